// crates/stencil-decorators/src/reexports.rs
// ============================================================================
// Module: Re-Exports Decorator
// Description: Stable re-exports of the active stack's body and buffer types.
// Purpose: Give generated crates one import surface independent of the edition.
// Dependencies: stencil-core
// ============================================================================

//! ## Overview
//! The re-exports decorator contributes `pub use` lines for the byte-buffer
//! and body types of the active stack edition to the library re-exports
//! section. Generated code and downstream users import through these aliases,
//! so switching editions never changes the generated crate's public surface.

// ============================================================================
// SECTION: Imports
// ============================================================================

use stencil_core::Bindings;
use stencil_core::Contribution;
use stencil_core::Decorator;
use stencil_core::DecoratorError;
use stencil_core::LogicalName;
use stencil_core::RunContext;
use stencil_core::Section;
use stencil_core::SectionKind;
use stencil_core::Template;

// ============================================================================
// CONSTANTS: Re-export defaults
// ============================================================================

/// Priority of the re-exports decorator.
pub const RE_EXPORTS_PRIORITY: i8 = 0;

/// Pattern emitted into the library re-exports section.
const RE_EXPORTS_PATTERN: &str = "pub use #{Bytes} as Bytes;\npub use #{Body} as Body;\n";

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Contributes edition-independent re-exports to the library root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReExportsDecorator;

impl ReExportsDecorator {
    /// Creates the decorator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Decorator for ReExportsDecorator {
    fn name(&self) -> &str {
        "ReExports"
    }

    fn priority(&self) -> i8 {
        RE_EXPORTS_PRIORITY
    }

    fn can_contribute(&self, kind: SectionKind) -> bool {
        matches!(kind, SectionKind::LibraryReExports)
    }

    fn contribute(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        let Section::LibraryReExports {
            ..
        } = section
        else {
            return Ok(None);
        };

        let template = Template::parse(RE_EXPORTS_PATTERN)?;
        let mut bindings = Bindings::new();
        bindings.bind_symbol("Bytes", ctx.resolve(&LogicalName::new("Bytes"))?);
        bindings.bind_symbol("Body", ctx.resolve(&LogicalName::new("Body"))?);
        Ok(Some(template.render(&bindings)?.into()))
    }
}
