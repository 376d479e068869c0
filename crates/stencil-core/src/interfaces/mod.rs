// crates/stencil-core/src/interfaces/mod.rs
// ============================================================================
// Module: Stencil Interfaces
// Description: Decorator, model-view, and artifact-writer contract surfaces.
// Purpose: Define the seams between the engine and its external collaborators.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Stencil integrates with external collaborators
//! without embedding host-specific details: decorators plug generated-code
//! fragments into sections, model views expose read-only IDL queries, and
//! artifact writers receive finalized buffers. Implementations must be
//! deterministic; the engine never performs I/O through these seams during
//! generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::artifact::Artifact;
use crate::core::bundle::DependencyBundle;
use crate::core::bundle::DependencySet;
use crate::core::edition::StackEdition;
use crate::core::identifiers::LogicalName;
use crate::core::identifiers::OperationId;
use crate::core::identifiers::ServiceId;
use crate::core::identifiers::TraitId;
use crate::core::section::Section;
use crate::core::section::SectionKind;
use crate::core::symbol::Symbol;
use crate::core::symbol::SymbolError;
use crate::core::symbol::SymbolTable;
use crate::core::template::RenderError;
use crate::core::template::Rendered;
use crate::core::template::TemplateError;

// ============================================================================
// SECTION: Model View
// ============================================================================

/// Read-only queries over the input interface-definition model.
///
/// The engine only ever reads the model; mutation is a front-end concern and
/// happens before a run starts. Implementations are `Send + Sync` so one
/// model may serve parallel artifact generation.
pub trait ModelView: Send + Sync {
    /// Lists every service in the model.
    fn services(&self) -> Vec<ServiceId>;

    /// Lists the operations of a service; empty when the service is unknown.
    fn operations_of(&self, service: &ServiceId) -> Vec<OperationId>;

    /// Returns true when the operation carries the given trait.
    fn operation_has_trait(
        &self,
        service: &ServiceId,
        operation: &OperationId,
        trait_id: &TraitId,
    ) -> bool;

    /// Returns the service's documentation, if modeled.
    fn service_docs(&self, service: &ServiceId) -> Option<&str>;
}

// ============================================================================
// SECTION: Run Context
// ============================================================================

/// Immutable run-scoped configuration threaded through every contribution.
///
/// # Invariants
/// - One edition is fixed at construction and never changes mid-run.
/// - The bundle and symbol table are pure functions of that edition plus any
///   construction-time custom bindings.
/// - Shareable across threads for parallel artifact generation; nothing here
///   is mutable after construction.
pub struct RunContext<'model> {
    /// Edition the run was fixed to.
    edition: StackEdition,
    /// Dependency bundle resolved from the edition.
    bundle: DependencyBundle,
    /// Symbol table backed by the bundle.
    symbols: SymbolTable,
    /// Read-only model view supplied by the host.
    model: &'model dyn ModelView,
}

impl<'model> RunContext<'model> {
    /// Builds a run context with the built-in symbol catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError`] when the built-in catalog is inconsistent with
    /// the edition's bundle; this indicates a defect in the catalogs, not a
    /// caller mistake.
    pub fn new(edition: StackEdition, model: &'model dyn ModelView) -> Result<Self, SymbolError> {
        let bundle = DependencyBundle::for_edition(edition);
        let symbols = SymbolTable::builtin(&bundle)?;
        Ok(Self {
            edition,
            bundle,
            symbols,
            model,
        })
    }

    /// Builds a run context from pre-assembled parts.
    ///
    /// Hosts use this to add custom symbol bindings before a run starts; the
    /// table must have been built against the same bundle.
    #[must_use]
    pub const fn from_parts(
        edition: StackEdition,
        bundle: DependencyBundle,
        symbols: SymbolTable,
        model: &'model dyn ModelView,
    ) -> Self {
        Self {
            edition,
            bundle,
            symbols,
            model,
        }
    }

    /// Returns the edition the run was fixed to.
    #[must_use]
    pub const fn edition(&self) -> StackEdition {
        self.edition
    }

    /// Returns the active dependency bundle.
    #[must_use]
    pub const fn bundle(&self) -> &DependencyBundle {
        &self.bundle
    }

    /// Returns the active symbol table.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns the read-only model view.
    #[must_use]
    pub const fn model(&self) -> &'model dyn ModelView {
        self.model
    }

    /// Resolves a logical name through the active symbol table.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Unbound`] when the name has no mapping under
    /// the active edition.
    pub fn resolve(&self, name: &LogicalName) -> Result<Symbol, SymbolError> {
        self.symbols.resolve(name)
    }
}

impl std::fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext").field("edition", &self.edition).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Decorator
// ============================================================================

/// Errors raised while a decorator computes its contribution.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoratorError {
    /// Symbol resolution failed inside the contribution.
    #[error("symbol resolution failed: {0}")]
    Symbol(#[from] SymbolError),
    /// A template pattern failed to parse.
    #[error("template parse failed: {0}")]
    Template(#[from] TemplateError),
    /// A template render failed.
    #[error("template render failed: {0}")]
    Render(#[from] RenderError),
    /// Decorator-specific failure.
    #[error("contribution failed: {0}")]
    Contribution(String),
}

/// One decorator's rendered fragment plus the dependencies it referenced.
///
/// # Invariants
/// - `dependencies` is the complete set of bundle entries the fragment
///   requires; there is no other channel for declaring dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Fragment text appended to the section output.
    pub text: String,
    /// Bundle entries the fragment requires.
    pub dependencies: DependencySet,
}

impl Contribution {
    /// Creates a contribution with no dependencies.
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dependencies: DependencySet::new(),
        }
    }
}

impl From<Rendered> for Contribution {
    fn from(rendered: Rendered) -> Self {
        Self {
            text: rendered.text,
            dependencies: rendered.dependencies,
        }
    }
}

/// A pluggable unit contributing generated-code fragments to sections.
///
/// # Invariants
/// - `name` is unique within a registry and stable across runs.
/// - `priority` is the fixed-width signed order key: lower values contribute
///   first; ties are broken lexicographically by name. Composition
///   correctness (e.g. one decorator wrapping another's output) is the
///   responsibility of priority assignment, not the dispatcher.
/// - Decorators are stateless with respect to the registry; any internal
///   state is scoped to one generation run.
pub trait Decorator {
    /// Returns the unique decorator name.
    fn name(&self) -> &str;

    /// Returns the order key; lower values contribute first.
    fn priority(&self) -> i8;

    /// Returns true when the decorator may contribute to the section kind.
    fn can_contribute(&self, kind: SectionKind) -> bool;

    /// Computes the decorator's contribution for a section.
    ///
    /// Returning `Ok(None)` declines the section (a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError`] when the contribution cannot be computed;
    /// the dispatcher aborts the whole section and discards partial output.
    fn contribute(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError>;
}

// ============================================================================
// SECTION: Artifact Writer
// ============================================================================

/// Artifact writer errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Writer reported an error.
    #[error("artifact writer error: {0}")]
    Writer(String),
}

/// Host-side seam receiving finalized artifacts.
///
/// The engine finishes a run by handing the artifact to a writer; writing
/// files and emitting the build manifest from the aggregated dependency set
/// are host concerns.
pub trait ArtifactWriter {
    /// Writes a finalized artifact.
    ///
    /// # Errors
    ///
    /// Returns [`WriterError`] when writing fails.
    fn write(&mut self, artifact: &Artifact) -> Result<(), WriterError>;
}
