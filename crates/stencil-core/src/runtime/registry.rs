// crates/stencil-core/src/runtime/registry.rs
// ============================================================================
// Module: Stencil Decorator Registry
// Description: Registry and section dispatcher for decorator contributions.
// Purpose: Compose contributions in a stable total order with fail-fast dispatch.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! The registry holds the run's decorators and dispatches sections to them.
//! Output order is a total order over decorators: ascending priority value,
//! ties broken lexicographically by name. The comparison rule is exposed as
//! [`contribution_order`] so hosts and tests can verify it directly instead
//! of relying on documentation. Registration order never affects output
//! order.
//! Invariants:
//! - Decorator names are unique within a registry.
//! - A contribution error aborts the whole section; partial output is
//!   discarded, never emitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use thiserror::Error;

use crate::core::artifact::SectionOutput;
use crate::core::section::Section;
use crate::core::section::SectionKind;
use crate::interfaces::Decorator;
use crate::interfaces::DecoratorError;
use crate::interfaces::RunContext;

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Errors raised while registering decorators.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A decorator with the same name is already registered.
    #[error("decorator already registered: {name}")]
    Duplicate {
        /// Name registered more than once.
        name: String,
    },
}

/// Errors raised while dispatching a section.
///
/// # Invariants
/// - Carries the decorator name and section kind for actionable reporting.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A decorator failed while computing its contribution.
    #[error("decorator {decorator} failed for section {kind}: {source}")]
    Contribution {
        /// Decorator that failed.
        decorator: String,
        /// Section kind being dispatched.
        kind: SectionKind,
        /// Underlying contribution error.
        #[source]
        source: DecoratorError,
    },
}

// ============================================================================
// SECTION: Contribution Order
// ============================================================================

/// The total order decorator contributions are emitted in.
///
/// Ascending priority value first (lower contributes earlier), ties broken
/// lexicographically by name. Within one registry names are unique, so the
/// order is strict and dispatch output is reproducible byte for byte.
#[must_use]
pub fn contribution_order(a: &dyn Decorator, b: &dyn Decorator) -> Ordering {
    a.priority().cmp(&b.priority()).then_with(|| a.name().cmp(b.name()))
}

// ============================================================================
// SECTION: Decorator Registry
// ============================================================================

/// Run-scoped decorator collection with section dispatch.
///
/// # Invariants
/// - Decorator names are unique within the registry.
/// - Registered decorators are `Send + Sync` and stored behind trait objects,
///   so one registry may serve parallel artifact generation read-only.
#[derive(Default)]
pub struct DecoratorRegistry {
    /// Registered decorators in registration order.
    decorators: Vec<Box<dyn Decorator + Send + Sync>>,
}

impl DecoratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a decorator.
    ///
    /// Registration order does not affect output order; only priority and
    /// name do.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when a decorator with the same
    /// name is already registered.
    pub fn register(
        &mut self,
        decorator: impl Decorator + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        if self.decorators.iter().any(|existing| existing.name() == decorator.name()) {
            return Err(RegistryError::Duplicate {
                name: decorator.name().to_string(),
            });
        }
        self.decorators.push(Box::new(decorator));
        Ok(())
    }

    /// Returns the number of registered decorators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Returns true when no decorators are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Returns decorator names in contribution order.
    #[must_use]
    pub fn names_in_order(&self) -> Vec<&str> {
        let mut ordered: Vec<&(dyn Decorator + Send + Sync)> =
            self.decorators.iter().map(AsRef::as_ref).collect();
        ordered.sort_by(|a, b| contribution_order(*a, *b));
        ordered.into_iter().map(|decorator| decorator.name()).collect()
    }

    /// Dispatches a section to every capable decorator in contribution order.
    ///
    /// Decorators that decline are skipped. Contribution text is concatenated
    /// in order; dependency entries are unioned, deduplicating identical
    /// entries only.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Contribution`] when any decorator fails; the
    /// section's partial output is discarded.
    pub fn dispatch(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<SectionOutput, DispatchError> {
        let kind = section.kind();
        let mut capable: Vec<&(dyn Decorator + Send + Sync)> = self
            .decorators
            .iter()
            .map(AsRef::as_ref)
            .filter(|decorator| decorator.can_contribute(kind))
            .collect();
        capable.sort_by(|a, b| contribution_order(*a, *b));

        let mut output = SectionOutput::default();
        for decorator in capable {
            match decorator.contribute(section, ctx) {
                Ok(Some(contribution)) => {
                    output.text.push_str(&contribution.text);
                    output.dependencies.extend(contribution.dependencies);
                }
                Ok(None) => {}
                Err(source) => {
                    return Err(DispatchError::Contribution {
                        decorator: decorator.name().to_string(),
                        kind,
                        source,
                    });
                }
            }
        }
        Ok(output)
    }
}

impl std::fmt::Debug for DecoratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoratorRegistry")
            .field("decorators", &self.names_in_order())
            .finish()
    }
}
