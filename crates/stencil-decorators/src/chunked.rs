// crates/stencil-decorators/src/chunked.rs
// ============================================================================
// Module: Chunked Encoding Decorator
// Description: Chunked body framing for operations carrying the streaming trait.
// Purpose: Emit chunked framing grounded to the active bundle's body types.
// Dependencies: stencil-core, serde
// ============================================================================

//! ## Overview
//! The chunked encoding decorator contributes body-framing helpers to the
//! operation customization section of every operation carrying the streaming
//! trait. Its priority places it before the checksum decorator, so checksum
//! wrapping always applies to the framed body rather than the raw one; that
//! ordering is carried entirely by the priority values.

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
// CONSTANTS: Chunked encoding defaults
// ============================================================================

/// Trait identifier gating chunked framing by default.
pub const DEFAULT_STREAMING_TRAIT: &str = "streaming";

/// Priority of the chunked encoding decorator; runs before checksum wrapping.
pub const CHUNKED_ENCODING_PRIORITY: i8 = 9;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the chunked encoding decorator.
///
/// # Invariants
/// - `trait_id` names the model trait that opts an operation in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedEncodingConfig {
    /// Model trait that opts an operation into chunked framing.
    pub trait_id: TraitId,
}

impl Default for ChunkedEncodingConfig {
    fn default() -> Self {
        Self {
            trait_id: TraitId::new(DEFAULT_STREAMING_TRAIT),
        }
    }
}

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Contributes chunked body framing for streaming-traited operations.
#[derive(Debug, Clone, Default)]
pub struct ChunkedEncodingDecorator {
    /// Decorator configuration.
    config: ChunkedEncodingConfig,
}

impl ChunkedEncodingDecorator {
    /// Creates the decorator with the given configuration.
    #[must_use]
    pub const fn new(config: ChunkedEncodingConfig) -> Self {
        Self {
            config,
        }
    }
}

impl Decorator for ChunkedEncodingDecorator {
    fn name(&self) -> &str {
        "ChunkedEncoding"
    }

    fn priority(&self) -> i8 {
        CHUNKED_ENCODING_PRIORITY
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
            "fn {fn_name}_chunked_body(payload: #{{Bytes}}) -> #{{Body}} {{\n    \
             let framed = frame_chunks(payload);\n    \
             #{{Body}}::from(framed)\n}}\n",
            fn_name = Template::escape(&operation.as_str().to_lowercase()),
        );
        let template = Template::parse(&pattern)?;
        let mut bindings = Bindings::new();
        bindings.bind_symbol("Bytes", ctx.resolve(&LogicalName::new("Bytes"))?);
        bindings.bind_symbol("Body", ctx.resolve(&LogicalName::new("Body"))?);
        Ok(Some(template.render(&bindings)?.into()))
    }
}
