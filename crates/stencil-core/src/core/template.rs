// crates/stencil-core/src/core/template.rs
// ============================================================================
// Module: Stencil Templates
// Description: Text patterns with named placeholders, parsed before rendering.
// Purpose: Reject malformed patterns early so render failures are binding-only.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A template is a text pattern containing `#{Name}` placeholders, parsed
//! once into literal and placeholder segments. Parsing is strict: a `#` is
//! either the start of a placeholder or the escape `##` (a literal `#`);
//! anything else is rejected so the renderer never has to infer intent.
//! Callers embedding literal delimiter characters in supplied text must run
//! them through [`Template::escape`] before binding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::core::bundle::DependencySet;
use crate::core::symbol::Symbol;

// ============================================================================
// SECTION: Template Errors
// ============================================================================

/// Errors raised while parsing a template pattern.
///
/// # Invariants
/// - Positions are byte offsets into the original pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A placeholder was opened but never closed.
    #[error("unclosed placeholder starting at byte {position}")]
    Unclosed {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// A placeholder contained no name.
    #[error("empty placeholder at byte {position}")]
    Empty {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// A placeholder name contained a character outside `[A-Za-z0-9_]`.
    #[error("invalid placeholder character {found:?} at byte {position}")]
    InvalidCharacter {
        /// Offending character.
        found: char,
        /// Byte offset of the offending character.
        position: usize,
    },
    /// A `#` was neither a placeholder start nor the `##` escape.
    #[error("unescaped '#' at byte {position} (write '##' for a literal '#')")]
    StrayDelimiter {
        /// Byte offset of the stray delimiter.
        position: usize,
    },
}

// ============================================================================
// SECTION: Segments
// ============================================================================

/// One parsed piece of a template pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal text emitted verbatim.
    Literal(String),
    /// Named placeholder substituted at render time.
    Placeholder(String),
}

// ============================================================================
// SECTION: Template
// ============================================================================

/// A text pattern with named placeholders, parsed once at construction.
///
/// # Invariants
/// - Segments faithfully reproduce the pattern; `##` has already collapsed
///   to a literal `#`.
/// - Render-time failures are binding-related only; malformed patterns never
///   survive parsing.
///
/// # Examples
/// ```
/// use stencil_core::Template;
///
/// let template = Template::parse("#{Body}::new(#{Bytes}::from(x))")?;
/// let names: Vec<&str> = template.placeholders().collect();
/// assert_eq!(names, ["Body", "Bytes"]);
/// # Ok::<(), stencil_core::TemplateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Original pattern text, kept for display and error context.
    pattern: String,
    /// Parsed literal/placeholder segments in pattern order.
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a pattern into a template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the pattern contains an unclosed or
    /// empty placeholder, an invalid placeholder character, or an unescaped
    /// delimiter.
    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((position, ch)) = chars.next() {
            if ch != '#' {
                literal.push(ch);
                continue;
            }
            match chars.peek().copied() {
                Some((_, '#')) => {
                    chars.next();
                    literal.push('#');
                }
                Some((_, '{')) => {
                    chars.next();
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(position, &mut chars)?);
                }
                _ => {
                    return Err(TemplateError::StrayDelimiter {
                        position,
                    });
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Iterates placeholder names in pattern order, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::Placeholder(name) => Some(name.as_str()),
        })
    }

    /// Returns the parsed segments for rendering.
    #[allow(dead_code, reason = "exposed for rendering; currently exercised only by unit tests")]
    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Escapes literal delimiter characters in caller-supplied text.
    ///
    /// The renderer never escapes on the caller's behalf; any text value that
    /// may contain `#` must pass through this helper before binding.
    #[must_use]
    pub fn escape(text: &str) -> String {
        text.replace('#', "##")
    }

    /// Renders the template with the supplied bindings.
    ///
    /// Every placeholder must be bound; a symbol binding substitutes the
    /// symbol's fully-qualified path and records its bundle entry, a nested
    /// binding substitutes previously rendered text and propagates its
    /// dependency set upward.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingBinding`] when a placeholder has no
    /// binding. There is no silent empty substitution.
    ///
    /// # Examples
    /// ```
    /// use stencil_core::{Bindings, DependencyBundle, LogicalName, StackEdition};
    /// use stencil_core::{SymbolTable, Template};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let bundle = DependencyBundle::for_edition(StackEdition::Http1);
    /// let symbols = SymbolTable::builtin(&bundle)?;
    /// let template = Template::parse("#{Body}::new(#{Bytes}::from(x))")?;
    /// let mut bindings = Bindings::new();
    /// bindings.bind_symbol("Body", symbols.resolve(&LogicalName::new("Body"))?);
    /// bindings.bind_symbol("Bytes", symbols.resolve(&LogicalName::new("Bytes"))?);
    /// let rendered = template.render(&bindings)?;
    /// assert_eq!(rendered.text, "http_body_util::Full::new(bytes::Bytes::from(x))");
    /// # Ok(())
    /// # }
    /// ```
    pub fn render(&self, bindings: &Bindings) -> Result<Rendered, RenderError> {
        let mut text = String::new();
        let mut dependencies = DependencySet::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Placeholder(name) => match bindings.get(name) {
                    Some(Binding::Symbol(symbol)) => {
                        text.push_str(&symbol.path);
                        dependencies.insert(symbol.dependency.clone());
                    }
                    Some(Binding::Nested(rendered)) => {
                        text.push_str(&rendered.text);
                        dependencies.extend(rendered.dependencies.iter().cloned());
                    }
                    None => {
                        return Err(RenderError::MissingBinding {
                            placeholder: name.clone(),
                            pattern: self.pattern.clone(),
                        });
                    }
                },
            }
        }
        Ok(Rendered {
            text,
            dependencies,
        })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pattern.fmt(f)
    }
}

/// Parses one placeholder body after its `#{` opener.
fn parse_placeholder(
    start: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<Segment, TemplateError> {
    let mut name = String::new();
    for (position, ch) in chars.by_ref() {
        if ch == '}' {
            if name.is_empty() {
                return Err(TemplateError::Empty {
                    position: start,
                });
            }
            return Ok(Segment::Placeholder(name));
        }
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(TemplateError::InvalidCharacter {
                found: ch,
                position,
            });
        }
        name.push(ch);
    }
    Err(TemplateError::Unclosed {
        position: start,
    })
}

// ============================================================================
// SECTION: Render Errors
// ============================================================================

/// Errors raised while rendering a parsed template.
///
/// # Invariants
/// - Render failures are binding-related only; malformed patterns are
///   rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A placeholder had no entry in the supplied bindings.
    #[error("missing binding for placeholder {placeholder} in template: {pattern}")]
    MissingBinding {
        /// Placeholder name without a binding.
        placeholder: String,
        /// Pattern the placeholder appears in.
        pattern: String,
    },
}

// ============================================================================
// SECTION: Bindings
// ============================================================================

/// One placeholder binding: a resolved symbol or a nested rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Substitute the symbol's fully-qualified path.
    Symbol(Symbol),
    /// Substitute previously rendered text, propagating its dependencies.
    Nested(Rendered),
}

/// Placeholder bindings supplied to [`Template::render`].
///
/// # Invariants
/// - Later bindings for the same placeholder replace earlier ones; templates
///   see one binding per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    /// Bindings keyed by placeholder name.
    entries: BTreeMap<String, Binding>,
}

impl Bindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a placeholder to a resolved symbol.
    pub fn bind_symbol(&mut self, placeholder: impl Into<String>, symbol: Symbol) {
        self.entries.insert(placeholder.into(), Binding::Symbol(symbol));
    }

    /// Binds a placeholder to a nested rendered fragment.
    pub fn bind_nested(&mut self, placeholder: impl Into<String>, rendered: Rendered) {
        self.entries.insert(placeholder.into(), Binding::Nested(rendered));
    }

    /// Returns the binding for a placeholder, if present.
    #[must_use]
    pub fn get(&self, placeholder: &str) -> Option<&Binding> {
        self.entries.get(placeholder)
    }

    /// Returns true when a placeholder is bound.
    #[must_use]
    pub fn contains(&self, placeholder: &str) -> bool {
        self.entries.contains_key(placeholder)
    }
}

// ============================================================================
// SECTION: Rendered Output
// ============================================================================

/// Result of rendering one template: text plus referenced dependencies.
///
/// # Invariants
/// - `dependencies` is the union of the bundle entries of every symbol used,
///   including those of nested fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Rendered text with all placeholders substituted.
    pub text: String,
    /// Bundle entries referenced by the substituted symbols.
    pub dependencies: DependencySet,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
