// crates/stencil-decorators/src/lib.rs
// ============================================================================
// Module: Stencil Built-in Decorators
// Description: Reference decorators shipped with the Stencil engine.
// Purpose: Provide zero-config contributions aligned with the built-in bundles.
// Dependencies: stencil-core, serde
// ============================================================================

//! ## Overview
//! This crate ships the built-in decorators (checksum, chunked transfer
//! encoding, library re-exports, crate documentation) and a registration
//! helper that installs the whole set. Every decorator resolves its library
//! references through the run's symbol table, so contributions stay
//! consistent with the stack edition the run was fixed to.
//! Invariants:
//! - Built-in priorities are stable: chunked framing (9) always precedes
//!   checksum wrapping (10) for the same operation.
//! - Decorators are pure: equal sections and contexts yield equal
//!   contributions.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builtin;
pub mod checksum;
pub mod chunked;
pub mod docs;
pub mod reexports;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builtin::BuiltinDecoratorConfigs;
pub use builtin::register_builtin_decorators;
pub use checksum::ChecksumConfig;
pub use checksum::ChecksumDecorator;
pub use chunked::ChunkedEncodingConfig;
pub use chunked::ChunkedEncodingDecorator;
pub use docs::CrateDocsDecorator;
pub use reexports::ReExportsDecorator;
