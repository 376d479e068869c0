// crates/stencil-core/src/lib.rs
// ============================================================================
// Module: Stencil Core Library
// Description: Deterministic extension engine for model-driven code generation.
// Purpose: Compose decorator contributions into artifacts grounded to bundles.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Stencil Core is the extension engine of a model-driven code generator. A
//! host driver walks an interface model and raises typed [`Section`] values;
//! the [`DecoratorRegistry`] dispatches each section to every registered
//! [`Decorator`] in a stable total order and concatenates their rendered
//! fragments into an [`Artifact`] buffer. Fragments resolve external library
//! references through a per-run [`SymbolTable`] backed by the
//! [`DependencyBundle`] selected by the run's [`StackEdition`].
//! Invariants:
//! - Dispatch order is a total order over decorators: ascending priority,
//!   ties broken by name.
//! - One run fixes one edition; bundles for different editions never mix.
//! - Dependency aggregation is a pure return value; decorators share no
//!   mutable state.
//!
//! Generation is synchronous and deterministic; the engine performs no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::artifact::Artifact;
pub use crate::core::artifact::SectionOutput;
pub use crate::core::bundle::BundleError;
pub use crate::core::bundle::DependencyBundle;
pub use crate::core::bundle::DependencyEntry;
pub use crate::core::bundle::DependencySet;
pub use crate::core::bundle::DependencySource;
pub use crate::core::edition::ALL_EDITIONS;
pub use crate::core::edition::EditionParseError;
pub use crate::core::edition::StackEdition;
pub use crate::core::identifiers::LibraryName;
pub use crate::core::identifiers::LogicalName;
pub use crate::core::identifiers::OperationId;
pub use crate::core::identifiers::OutputLocation;
pub use crate::core::identifiers::ServiceId;
pub use crate::core::identifiers::TraitId;
pub use crate::core::section::Section;
pub use crate::core::section::SectionKind;
pub use crate::core::symbol::Symbol;
pub use crate::core::symbol::SymbolError;
pub use crate::core::symbol::SymbolTable;
pub use crate::core::template::Binding;
pub use crate::core::template::Bindings;
pub use crate::core::template::RenderError;
pub use crate::core::template::Rendered;
pub use crate::core::template::Template;
pub use crate::core::template::TemplateError;
pub use crate::interfaces::ArtifactWriter;
pub use crate::interfaces::Contribution;
pub use crate::interfaces::Decorator;
pub use crate::interfaces::DecoratorError;
pub use crate::interfaces::ModelView;
pub use crate::interfaces::RunContext;
pub use crate::interfaces::WriterError;
pub use crate::runtime::model::InMemoryModel;
pub use crate::runtime::registry::DecoratorRegistry;
pub use crate::runtime::registry::DispatchError;
pub use crate::runtime::registry::RegistryError;
pub use crate::runtime::registry::contribution_order;
