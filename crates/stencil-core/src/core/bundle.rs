// crates/stencil-core/src/core/bundle.rs
// ============================================================================
// Module: Stencil Dependency Bundles
// Description: Immutable, internally consistent external library sets.
// Purpose: Ground generated code to one coherent dependency stack per run.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A dependency bundle is the immutable set of external library coordinates
//! one stack edition generates against. Bundles are keyed by library name, so
//! a single bundle can never carry two versions of the same library, and the
//! bundle for one edition is never merged with another: a run fixes one
//! edition in its immutable context before generation starts.
//! Invariants:
//! - One entry per library name within a bundle.
//! - `for_edition` is a pure, total function over the closed edition set.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::edition::StackEdition;
use crate::core::identifiers::LibraryName;

// ============================================================================
// SECTION: Dependency Entries
// ============================================================================

/// Source coordinate for one external library.
///
/// # Invariants
/// - `Version` carries a registry version requirement string.
/// - `Path` carries a location relative to the generated crate's workspace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DependencySource {
    /// Registry dependency pinned to a version requirement.
    Version(String),
    /// Local path dependency relative to the generated workspace.
    Path(String),
}

impl fmt::Display for DependencySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(version) => write!(f, "version {version}"),
            Self::Path(path) => write!(f, "path {path}"),
        }
    }
}

/// One external library coordinate: name, source, and feature flags.
///
/// # Invariants
/// - Equality is structural; aggregation deduplicates identical entries only,
///   never semantically.
/// - `features` are sorted for stable serialization and ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEntry {
    /// Library name as it appears in the generated manifest.
    pub library: LibraryName,
    /// Version or path source for the library.
    pub source: DependencySource,
    /// Feature flags enabled on the library.
    pub features: BTreeSet<String>,
}

impl DependencyEntry {
    /// Creates a registry entry with no features.
    #[must_use]
    pub fn version(library: impl Into<LibraryName>, version: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            source: DependencySource::Version(version.into()),
            features: BTreeSet::new(),
        }
    }

    /// Creates a path entry with no features.
    #[must_use]
    pub fn path(library: impl Into<LibraryName>, path: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            source: DependencySource::Path(path.into()),
            features: BTreeSet::new(),
        }
    }

    /// Returns the entry with the given feature flags enabled.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.library, self.source)
    }
}

/// Aggregated set of dependency entries referenced during generation.
///
/// Identical entries collapse; distinct entries for the same library are kept
/// as-is, since semantic reconciliation is a manifest-emission concern.
pub type DependencySet = BTreeSet<DependencyEntry>;

// ============================================================================
// SECTION: Bundle Errors
// ============================================================================

/// Errors raised while constructing a dependency bundle.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// Two entries in one bundle target the same library.
    #[error("duplicate library in {edition} bundle: {library}")]
    DuplicateLibrary {
        /// Edition whose bundle was being built.
        edition: StackEdition,
        /// Library declared more than once.
        library: LibraryName,
    },
}

// ============================================================================
// SECTION: Dependency Bundle
// ============================================================================

/// Immutable, internally consistent library set for one stack edition.
///
/// # Invariants
/// - Entries are keyed by library name: one version per library.
/// - Never merged with a bundle for a different edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyBundle {
    /// Edition that produced this bundle.
    edition: StackEdition,
    /// Entries keyed by library name.
    entries: BTreeMap<LibraryName, DependencyEntry>,
}

impl DependencyBundle {
    /// Builds a bundle from entries, rejecting duplicate library names.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::DuplicateLibrary`] when two entries share a
    /// library name.
    pub fn new(
        edition: StackEdition,
        entries: impl IntoIterator<Item = DependencyEntry>,
    ) -> Result<Self, BundleError> {
        let mut keyed = BTreeMap::new();
        for entry in entries {
            let library = entry.library.clone();
            if keyed.insert(library.clone(), entry).is_some() {
                return Err(BundleError::DuplicateLibrary {
                    edition,
                    library,
                });
            }
        }
        Ok(Self {
            edition,
            entries: keyed,
        })
    }

    /// Returns the built-in bundle for the given edition.
    ///
    /// Pure and total over the closed edition set; calling twice with the
    /// same edition yields equal bundles.
    #[must_use]
    pub fn for_edition(edition: StackEdition) -> Self {
        let entries = match edition {
            StackEdition::Http0 => vec![
                DependencyEntry::version("http", "0.2"),
                DependencyEntry::version("http-body", "0.4"),
                DependencyEntry::version("hyper", "0.14").with_features(["client", "http1"]),
                DependencyEntry::version("bytes", "1"),
                DependencyEntry::version("crc32fast", "1"),
            ],
            StackEdition::Http1 => vec![
                DependencyEntry::version("http", "1"),
                DependencyEntry::version("http-body", "1"),
                DependencyEntry::version("http-body-util", "0.1"),
                DependencyEntry::version("bytes", "1"),
                DependencyEntry::version("crc32fast", "1"),
            ],
        };
        let mut keyed = BTreeMap::new();
        for entry in entries {
            keyed.insert(entry.library.clone(), entry);
        }
        Self {
            edition,
            entries: keyed,
        }
    }

    /// Returns the edition that produced this bundle.
    #[must_use]
    pub const fn edition(&self) -> StackEdition {
        self.edition
    }

    /// Returns the entry for the given library, if present.
    #[must_use]
    pub fn get(&self, library: &LibraryName) -> Option<&DependencyEntry> {
        self.entries.get(library)
    }

    /// Returns true when the bundle declares the given library.
    #[must_use]
    pub fn contains(&self, library: &LibraryName) -> bool {
        self.entries.contains_key(library)
    }

    /// Iterates entries in library-name order.
    pub fn entries(&self) -> impl Iterator<Item = &DependencyEntry> {
        self.entries.values()
    }

    /// Returns the number of entries in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
