// crates/stencil-core/src/core/symbol.rs
// ============================================================================
// Module: Stencil Symbols
// Description: Resolved references plus the table that grounds them to bundles.
// Purpose: Tie every rendered library reference to an entry of the active bundle.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A symbol is a logical name resolved against the active dependency bundle
//! into a fully-qualified Rust path plus the bundle entry that must be
//! declared to use it. Symbols are produced only by the [`SymbolTable`], and
//! every binding in a table is validated against the bundle at construction,
//! so a template can never reference a library version inconsistent with the
//! edition the run was fixed to.
//! Invariants:
//! - Resolution is a pure function of (edition, logical name).
//! - Every bound symbol's dependency is an entry of the active bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::bundle::DependencyBundle;
use crate::core::bundle::DependencyEntry;
use crate::core::edition::StackEdition;
use crate::core::identifiers::LibraryName;
use crate::core::identifiers::LogicalName;

// ============================================================================
// SECTION: Symbol Errors
// ============================================================================

/// Errors raised while resolving or binding symbols.
///
/// # Invariants
/// - Variants carry the logical name and active edition for actionable
///   reporting to decorator authors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The logical name has no mapping under the active edition's bundle.
    #[error("unbound symbol: {name} has no mapping under edition {edition}")]
    Unbound {
        /// Logical name that failed to resolve.
        name: LogicalName,
        /// Edition whose bundle was active.
        edition: StackEdition,
    },
    /// A binding references a library absent from the active bundle.
    #[error("symbol {name} depends on {library}, which edition {edition}'s bundle does not declare")]
    MissingDependency {
        /// Logical name being bound.
        name: LogicalName,
        /// Library the binding requires.
        library: LibraryName,
        /// Edition whose bundle was active.
        edition: StackEdition,
    },
    /// A logical name was bound twice in one table.
    #[error("symbol already bound: {name}")]
    AlreadyBound {
        /// Logical name bound more than once.
        name: LogicalName,
    },
}

// ============================================================================
// SECTION: Symbol
// ============================================================================

/// A resolved symbol: fully-qualified path plus originating bundle entry.
///
/// # Invariants
/// - `dependency` is an entry of the bundle the symbol was resolved against.
/// - Resolution is pure: equal inputs yield equal symbols for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Logical name the symbol was resolved from.
    pub logical: LogicalName,
    /// Fully-qualified path substituted into rendered text.
    pub path: String,
    /// Bundle entry that must be declared to use the path.
    pub dependency: DependencyEntry,
}

impl Symbol {
    /// Creates a symbol from its parts.
    #[must_use]
    pub fn new(
        logical: impl Into<LogicalName>,
        path: impl Into<String>,
        dependency: DependencyEntry,
    ) -> Self {
        Self {
            logical: logical.into(),
            path: path.into(),
            dependency,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.logical, self.path)
    }
}

// ============================================================================
// SECTION: Symbol Table
// ============================================================================

/// Per-run table resolving logical names against the active bundle.
///
/// # Invariants
/// - Bindings are added at construction time only; the table is immutable
///   once a run starts.
/// - Every binding's library is declared by the bundle the table was built
///   against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    /// Edition the table resolves for, kept for error context.
    edition: StackEdition,
    /// Bindings keyed by logical name.
    bindings: BTreeMap<LogicalName, Symbol>,
}

impl SymbolTable {
    /// Creates an empty table for the bundle's edition.
    #[must_use]
    pub fn new(bundle: &DependencyBundle) -> Self {
        Self {
            edition: bundle.edition(),
            bindings: BTreeMap::new(),
        }
    }

    /// Builds the built-in symbol catalog for the bundle's edition.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError`] when a catalog row references a library the
    /// bundle does not declare; this cannot happen for bundles produced by
    /// [`DependencyBundle::for_edition`].
    pub fn builtin(bundle: &DependencyBundle) -> Result<Self, SymbolError> {
        let rows: &[(&str, &str, &str)] = match bundle.edition() {
            StackEdition::Http0 => &[
                ("HttpRequest", "http::Request", "http"),
                ("HttpResponse", "http::Response", "http"),
                ("Body", "hyper::Body", "hyper"),
                ("Bytes", "bytes::Bytes", "bytes"),
                ("Hyper", "hyper::Client", "hyper"),
                ("Crc32", "crc32fast::Hasher", "crc32fast"),
            ],
            StackEdition::Http1 => &[
                ("HttpRequest", "http::Request", "http"),
                ("HttpResponse", "http::Response", "http"),
                ("Body", "http_body_util::Full", "http-body-util"),
                ("BoxBody", "http_body_util::combinators::BoxBody", "http-body-util"),
                ("Bytes", "bytes::Bytes", "bytes"),
                ("Crc32", "crc32fast::Hasher", "crc32fast"),
            ],
        };
        let mut table = Self::new(bundle);
        for (logical, path, library) in rows {
            table.bind(LogicalName::new(*logical), *path, &LibraryName::new(*library), bundle)?;
        }
        Ok(table)
    }

    /// Binds a logical name to a path backed by a bundle library.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::MissingDependency`] when the bundle does not
    /// declare `library`, or [`SymbolError::AlreadyBound`] when the logical
    /// name already has a binding.
    pub fn bind(
        &mut self,
        logical: LogicalName,
        path: impl Into<String>,
        library: &LibraryName,
        bundle: &DependencyBundle,
    ) -> Result<(), SymbolError> {
        let Some(entry) = bundle.get(library) else {
            return Err(SymbolError::MissingDependency {
                name: logical,
                library: library.clone(),
                edition: self.edition,
            });
        };
        if self.bindings.contains_key(&logical) {
            return Err(SymbolError::AlreadyBound {
                name: logical,
            });
        }
        let symbol = Symbol::new(logical.clone(), path, entry.clone());
        self.bindings.insert(logical, symbol);
        Ok(())
    }

    /// Resolves a logical name to a symbol.
    ///
    /// Pure for the lifetime of the table: repeated calls with the same name
    /// return equal symbols.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::Unbound`] when the name has no binding under
    /// the active edition, naming both for actionable reporting.
    pub fn resolve(&self, name: &LogicalName) -> Result<Symbol, SymbolError> {
        self.bindings.get(name).cloned().ok_or_else(|| SymbolError::Unbound {
            name: name.clone(),
            edition: self.edition,
        })
    }

    /// Returns the edition the table resolves for.
    #[must_use]
    pub const fn edition(&self) -> StackEdition {
        self.edition
    }

    /// Iterates bound logical names in name order.
    pub fn logical_names(&self) -> impl Iterator<Item = &LogicalName> {
        self.bindings.keys()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use super::*;

    #[test]
    fn builtin_symbols_originate_from_bundle_entries() {
        for edition in crate::core::edition::ALL_EDITIONS {
            let bundle = DependencyBundle::for_edition(edition);
            let table = SymbolTable::builtin(&bundle).expect("builtin catalog is consistent");
            for name in table.logical_names() {
                let symbol = table.resolve(name).expect("bound name resolves");
                assert_eq!(
                    bundle.get(&symbol.dependency.library),
                    Some(&symbol.dependency),
                    "symbol {name} must originate from the {edition} bundle"
                );
            }
        }
    }

    #[test]
    fn bind_rejects_library_outside_bundle() {
        let bundle = DependencyBundle::for_edition(StackEdition::Http1);
        let mut table = SymbolTable::new(&bundle);
        let result = table.bind(
            LogicalName::new("Hyper"),
            "hyper::Client",
            &LibraryName::new("hyper"),
            &bundle,
        );
        assert!(matches!(result, Err(SymbolError::MissingDependency { .. })));
    }

    #[test]
    fn bind_rejects_double_binding() {
        let bundle = DependencyBundle::for_edition(StackEdition::Http1);
        let mut table = SymbolTable::new(&bundle);
        table
            .bind(LogicalName::new("Bytes"), "bytes::Bytes", &LibraryName::new("bytes"), &bundle)
            .expect("first binding succeeds");
        let result = table.bind(
            LogicalName::new("Bytes"),
            "bytes::BytesMut",
            &LibraryName::new("bytes"),
            &bundle,
        );
        assert!(matches!(result, Err(SymbolError::AlreadyBound { .. })));
    }
}
