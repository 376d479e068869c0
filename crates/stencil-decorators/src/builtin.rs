// crates/stencil-decorators/src/builtin.rs
// ============================================================================
// Module: Built-in Decorator Registration
// Description: Configuration bundle and registration for the built-in set.
// Purpose: Install the shipped decorators into a registry in one call.
// Dependencies: stencil-core, crate decorators
// ============================================================================

//! ## Overview
//! Registration helpers for the built-in decorator set. Hosts that want the
//! shipped behavior call [`register_builtin_decorators`] once before a run;
//! hosts with custom gating traits override the per-decorator configurations
//! first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use stencil_core::DecoratorRegistry;
use stencil_core::RegistryError;

use crate::checksum::ChecksumConfig;
use crate::checksum::ChecksumDecorator;
use crate::chunked::ChunkedEncodingConfig;
use crate::chunked::ChunkedEncodingDecorator;
use crate::docs::CrateDocsDecorator;
use crate::reexports::ReExportsDecorator;

// ============================================================================
// SECTION: Built-in Config
// ============================================================================

/// Configuration bundle for the built-in decorators.
///
/// # Invariants
/// - Defaults match the shipped gating traits (`checksum`, `streaming`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinDecoratorConfigs {
    /// Configuration for the checksum decorator.
    pub checksum: ChecksumConfig,
    /// Configuration for the chunked encoding decorator.
    pub chunked: ChunkedEncodingConfig,
}

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Registers every built-in decorator with the given configurations.
///
/// # Errors
///
/// Returns [`RegistryError::Duplicate`] when a built-in decorator name is
/// already registered.
pub fn register_builtin_decorators(
    registry: &mut DecoratorRegistry,
    configs: BuiltinDecoratorConfigs,
) -> Result<(), RegistryError> {
    registry.register(ChecksumDecorator::new(configs.checksum))?;
    registry.register(ChunkedEncodingDecorator::new(configs.chunked))?;
    registry.register(ReExportsDecorator::new())?;
    registry.register(CrateDocsDecorator::new())?;
    Ok(())
}
