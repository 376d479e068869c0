// crates/stencil-decorators/src/docs.rs
// ============================================================================
// Module: Crate Docs Decorator
// Description: Generated-crate header documentation from service model docs.
// Purpose: Emit crate-level docs naming the service and active stack edition.
// Dependencies: stencil-core
// ============================================================================

//! ## Overview
//! The crate docs decorator contributes the generated crate's header
//! documentation: the service's modeled documentation (when present) followed
//! by a line naming the stack edition the crate was generated against. The
//! contribution is plain text with no library references, so its dependency
//! set is empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use stencil_core::Contribution;
use stencil_core::Decorator;
use stencil_core::DecoratorError;
use stencil_core::RunContext;
use stencil_core::Section;
use stencil_core::SectionKind;

// ============================================================================
// CONSTANTS: Crate docs defaults
// ============================================================================

/// Priority of the crate docs decorator; docs lead every documentation section.
pub const CRATE_DOCS_PRIORITY: i8 = -10;

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Contributes crate-level documentation for the generated crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrateDocsDecorator;

impl CrateDocsDecorator {
    /// Creates the decorator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Decorator for CrateDocsDecorator {
    fn name(&self) -> &str {
        "CrateDocs"
    }

    fn priority(&self) -> i8 {
        CRATE_DOCS_PRIORITY
    }

    fn can_contribute(&self, kind: SectionKind) -> bool {
        matches!(kind, SectionKind::CrateDocumentation)
    }

    fn contribute(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        let Section::CrateDocumentation {
            service,
        } = section
        else {
            return Ok(None);
        };

        let mut text = String::new();
        if let Some(docs) = ctx.model().service_docs(service) {
            for line in docs.lines() {
                writeln!(text, "//! {line}")
                    .map_err(|err| DecoratorError::Contribution(err.to_string()))?;
            }
            text.push_str("//!\n");
        }
        writeln!(text, "//! Generated client for `{service}` against the {} HTTP stack.", ctx.edition())
            .map_err(|err| DecoratorError::Contribution(err.to_string()))?;
        Ok(Some(Contribution::text_only(text)))
    }
}
