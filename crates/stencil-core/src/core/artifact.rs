// crates/stencil-core/src/core/artifact.rs
// ============================================================================
// Module: Stencil Artifacts
// Description: Monotonic output buffers plus aggregated dependency sets.
// Purpose: Accumulate rendered section output for one generation run.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An artifact is the accumulating result of one generation run: rendered
//! text keyed by output location, plus the union of every dependency entry
//! referenced while rendering. The buffer grows monotonically and is never
//! read back during generation; the host hands the finalized artifact to an
//! external writer and derives the build manifest from the dependency set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::bundle::DependencySet;
use crate::core::identifiers::OutputLocation;

// ============================================================================
// SECTION: Section Output
// ============================================================================

/// Concatenated output of one section dispatch.
///
/// # Invariants
/// - `text` preserves contribution order exactly as dispatched.
/// - `dependencies` deduplicates identical entries only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOutput {
    /// Concatenated contribution text in dispatch order.
    pub text: String,
    /// Dependency entries referenced by the contributions.
    pub dependencies: DependencySet,
}

impl SectionOutput {
    /// Returns true when no decorator contributed to the section.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.dependencies.is_empty()
    }
}

// ============================================================================
// SECTION: Artifact
// ============================================================================

/// Accumulating output of one generation run.
///
/// # Invariants
/// - Buffers grow monotonically; nothing is removed or rewritten during a run.
/// - The dependency set is the union of every appended section's entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Rendered text keyed by output location.
    buffers: BTreeMap<OutputLocation, String>,
    /// Aggregated dependency entries referenced during construction.
    dependencies: DependencySet,
}

impl Artifact {
    /// Creates an empty artifact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends section output to the buffer for the given location.
    ///
    /// Text is concatenated after any previous output for the location;
    /// dependencies are unioned into the aggregate set.
    pub fn append(&mut self, location: OutputLocation, output: SectionOutput) {
        self.buffers.entry(location).or_default().push_str(&output.text);
        self.dependencies.extend(output.dependencies);
    }

    /// Returns the buffered text for a location, if any was appended.
    #[must_use]
    pub fn text(&self, location: &OutputLocation) -> Option<&str> {
        self.buffers.get(location).map(String::as_str)
    }

    /// Iterates buffered locations and their text in location order.
    pub fn buffers(&self) -> impl Iterator<Item = (&OutputLocation, &str)> {
        self.buffers.iter().map(|(location, text)| (location, text.as_str()))
    }

    /// Returns the aggregated dependency set.
    #[must_use]
    pub const fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Serializes the aggregated dependency set as manifest input.
    ///
    /// Hosts feed this JSON document to their manifest emitter; entries are
    /// ordered and deduplicated by identity only.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn dependencies_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.dependencies)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
