// crates/stencil-core/src/runtime/model.rs
// ============================================================================
// Module: Stencil In-Memory Model
// Description: Reference read-only model view backed by in-memory tables.
// Purpose: Serve tests, examples, and simple hosts without an IDL front end.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `InMemoryModel` is the reference [`ModelView`] implementation: a plain
//! in-memory table of services, operations, and operation traits. Real hosts
//! adapt their IDL front end's query surface to [`ModelView`] instead; the
//! engine itself only ever reads through the trait.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::core::identifiers::OperationId;
use crate::core::identifiers::ServiceId;
use crate::core::identifiers::TraitId;
use crate::interfaces::ModelView;

// ============================================================================
// SECTION: In-Memory Model
// ============================================================================

/// One service's operations and documentation.
#[derive(Debug, Clone, Default)]
struct ServiceEntry {
    /// Service documentation, if modeled.
    docs: Option<String>,
    /// Operations keyed by identifier, each with its trait set.
    operations: BTreeMap<OperationId, BTreeSet<TraitId>>,
}

/// Read-only model view backed by in-memory tables.
///
/// # Invariants
/// - Mutation happens only before a run; during generation the model is read
///   through the shared [`ModelView`] borrow and never changed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryModel {
    /// Services keyed by identifier.
    services: BTreeMap<ServiceId, ServiceEntry>,
}

impl InMemoryModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service with optional documentation.
    ///
    /// Re-adding a service replaces its documentation and keeps its
    /// operations.
    pub fn add_service(&mut self, service: ServiceId, docs: Option<String>) {
        self.services.entry(service).or_default().docs = docs;
    }

    /// Adds an operation with its trait set, creating the service if absent.
    pub fn add_operation(
        &mut self,
        service: &ServiceId,
        operation: OperationId,
        traits: impl IntoIterator<Item = TraitId>,
    ) {
        self.services
            .entry(service.clone())
            .or_default()
            .operations
            .insert(operation, traits.into_iter().collect());
    }
}

impl ModelView for InMemoryModel {
    fn services(&self) -> Vec<ServiceId> {
        self.services.keys().cloned().collect()
    }

    fn operations_of(&self, service: &ServiceId) -> Vec<OperationId> {
        self.services
            .get(service)
            .map(|entry| entry.operations.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn operation_has_trait(
        &self,
        service: &ServiceId,
        operation: &OperationId,
        trait_id: &TraitId,
    ) -> bool {
        self.services
            .get(service)
            .and_then(|entry| entry.operations.get(operation))
            .is_some_and(|traits| traits.contains(trait_id))
    }

    fn service_docs(&self, service: &ServiceId) -> Option<&str> {
        self.services.get(service).and_then(|entry| entry.docs.as_deref())
    }
}
