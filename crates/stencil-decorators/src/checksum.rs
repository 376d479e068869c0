// crates/stencil-decorators/src/checksum.rs
// ============================================================================
// Module: Checksum Decorator
// Description: Request checksum wrapping for operations carrying the checksum trait.
// Purpose: Emit checksum computation grounded to the active bundle's hasher.
// Dependencies: stencil-core, serde
// ============================================================================

//! ## Overview
//! The checksum decorator contributes a request-checksum helper to the
//! operation customization section of every operation carrying the checksum
//! trait. The hasher and byte-buffer types come from the symbol table, so the
//! emitted code always matches the run's stack edition.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use stencil_core::Bindings;
use stencil_core::Contribution;
use stencil_core::Decorator;
use stencil_core::DecoratorError;
use stencil_core::LogicalName;
use stencil_core::RunContext;
use stencil_core::Section;
use stencil_core::SectionKind;
use stencil_core::Template;
use stencil_core::TraitId;

// ============================================================================
// CONSTANTS: Checksum defaults
// ============================================================================

/// Trait identifier gating checksum contributions by default.
pub const DEFAULT_CHECKSUM_TRAIT: &str = "checksum";

/// Priority of the checksum decorator; runs after chunked framing.
pub const CHECKSUM_PRIORITY: i8 = 10;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the checksum decorator.
///
/// # Invariants
/// - `trait_id` names the model trait that opts an operation in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumConfig {
    /// Model trait that opts an operation into checksum wrapping.
    pub trait_id: TraitId,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            trait_id: TraitId::new(DEFAULT_CHECKSUM_TRAIT),
        }
    }
}

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Contributes request-checksum helpers for checksum-traited operations.
#[derive(Debug, Clone, Default)]
pub struct ChecksumDecorator {
    /// Decorator configuration.
    config: ChecksumConfig,
}

impl ChecksumDecorator {
    /// Creates the decorator with the given configuration.
    #[must_use]
    pub const fn new(config: ChecksumConfig) -> Self {
        Self {
            config,
        }
    }
}

impl Decorator for ChecksumDecorator {
    fn name(&self) -> &str {
        "Checksum"
    }

    fn priority(&self) -> i8 {
        CHECKSUM_PRIORITY
    }

    fn can_contribute(&self, kind: SectionKind) -> bool {
        matches!(kind, SectionKind::OperationCustomization)
    }

    fn contribute(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        let Section::OperationCustomization {
            service,
            operation,
        } = section
        else {
            return Ok(None);
        };
        if !ctx.model().operation_has_trait(service, operation, &self.config.trait_id) {
            return Ok(None);
        }

        let pattern = format!(
            "fn {fn_name}_checksum(body: &#{{Bytes}}) -> u32 {{\n    \
             let mut hasher = #{{Crc32}}::new();\n    \
             hasher.update(body);\n    \
             hasher.finalize()\n}}\n",
            fn_name = Template::escape(&operation.as_str().to_lowercase()),
        );
        let template = Template::parse(&pattern)?;
        let mut bindings = Bindings::new();
        bindings.bind_symbol("Bytes", ctx.resolve(&LogicalName::new("Bytes"))?);
        bindings.bind_symbol("Crc32", ctx.resolve(&LogicalName::new("Crc32"))?);
        Ok(Some(template.render(&bindings)?.into()))
    }
}
