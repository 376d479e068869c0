// crates/stencil-core/src/core/identifiers.rs
// ============================================================================
// Module: Stencil Identifiers
// Description: Canonical opaque identifiers for models, symbols, and outputs.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the canonical identifiers used throughout Stencil.
//! Identifiers are opaque UTF-8 strings and serialize transparently on the
//! wire. No normalization or validation is applied by these types; model
//! front ends own naming rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Model Identifiers
// ============================================================================

/// Service identifier for one service in the input model.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a new service identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ServiceId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Operation identifier scoped within a service.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(String);

impl OperationId {
    /// Creates a new operation identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for OperationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OperationId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Trait identifier attached to model operations (e.g. checksum, streaming).
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitId(String);

impl TraitId {
    /// Creates a new trait identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TraitId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TraitId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Dependency and Symbol Identifiers
// ============================================================================

/// External library name as declared in a dependency bundle.
///
/// # Invariants
/// - Opaque UTF-8 string; uniqueness within a bundle is enforced by the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryName(String);

impl LibraryName {
    /// Creates a new library name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the library name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LibraryName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LibraryName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Logical symbol name resolved through the active symbol table.
///
/// # Invariants
/// - Opaque UTF-8 string; whether a binding exists depends on the active edition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalName(String);

impl LogicalName {
    /// Creates a new logical symbol name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the logical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for LogicalName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LogicalName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Output location for rendered text, relative to the generated crate root.
///
/// # Invariants
/// - Opaque relative path string; hosts own path semantics and writing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputLocation(String);

impl OutputLocation {
    /// Creates a new output location.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Returns the location as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for OutputLocation {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OutputLocation {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
