// crates/stencil-core/src/core/section.rs
// ============================================================================
// Module: Stencil Sections
// Description: Typed insertion points raised while walking the model.
// Purpose: Identify where decorator contributions land in the artifact.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A section is a typed insertion point raised by the host driver for one
//! model element. The variant set is closed: dispatch and decorator
//! capability checks match exhaustively on [`SectionKind`], so adding a
//! section kind is a compile-time-checked change everywhere it must be
//! handled. Sections are immutable value objects for the duration of a
//! dispatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::OperationId;
use crate::core::identifiers::ServiceId;

// ============================================================================
// SECTION: Section Kinds
// ============================================================================

/// Payload-free tag identifying an insertion point kind.
///
/// # Invariants
/// - The set is closed and matched exhaustively by dispatch and decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Additional behavior generated for one operation.
    OperationCustomization,
    /// Re-exports emitted into the generated library root.
    LibraryReExports,
    /// Documentation emitted at the head of the generated crate.
    CrateDocumentation,
}

impl SectionKind {
    /// Returns the canonical name of the kind for error reporting.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OperationCustomization => "operation_customization",
            Self::LibraryReExports => "library_re_exports",
            Self::CrateDocumentation => "crate_documentation",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Insertion point raised for one model element.
///
/// # Invariants
/// - Immutable for the duration of a dispatch.
/// - Payloads identify model elements only; model data is read through the
///   run context's model view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Additional behavior for one operation of a service.
    OperationCustomization {
        /// Service the operation belongs to.
        service: ServiceId,
        /// Operation being customized.
        operation: OperationId,
    },
    /// Re-exports for the generated library root of a service.
    LibraryReExports {
        /// Service whose library root is being generated.
        service: ServiceId,
    },
    /// Crate-level documentation for a service.
    CrateDocumentation {
        /// Service whose crate documentation is being generated.
        service: ServiceId,
    },
}

impl Section {
    /// Returns the payload-free kind tag for this section.
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::OperationCustomization { .. } => SectionKind::OperationCustomization,
            Self::LibraryReExports { .. } => SectionKind::LibraryReExports,
            Self::CrateDocumentation { .. } => SectionKind::CrateDocumentation,
        }
    }

    /// Returns the service the section was raised for.
    #[must_use]
    pub const fn service(&self) -> &ServiceId {
        match self {
            Self::OperationCustomization { service, .. }
            | Self::LibraryReExports { service }
            | Self::CrateDocumentation { service } => service,
        }
    }
}
