// crates/stencil-core/tests/template_render.rs
// ============================================================================
// Module: Template Render Tests
// Description: Integration tests for template parsing and rendering.
// Purpose: Validate binding totality, escaping, and dependency propagation.
// Dependencies: stencil-core
// ============================================================================

//! ## Overview
//! Integration tests covering placeholder substitution, the missing-binding
//! failure, the caller-side escape rule, and dependency propagation through
//! nested fragments.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use stencil_core::Bindings;
use stencil_core::DependencyEntry;
use stencil_core::RenderError;
use stencil_core::Symbol;
use stencil_core::Template;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

fn lib_symbol(logical: &str, path: &str) -> Symbol {
    Symbol::new(logical, path, DependencyEntry::version("lib", "1"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn renders_symbols_and_collects_their_dependency() -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse("#{Body}::new(#{Bytes}::from(x))")?;
    let mut bindings = Bindings::new();
    bindings.bind_symbol("Body", lib_symbol("Body", "lib::Full"));
    bindings.bind_symbol("Bytes", lib_symbol("Bytes", "lib::Bytes"));

    let rendered = template.render(&bindings)?;
    assert_eq!(rendered.text, "lib::Full::new(lib::Bytes::from(x))");
    assert_eq!(rendered.dependencies.len(), 1);
    assert!(rendered.dependencies.contains(&DependencyEntry::version("lib", "1")));
    Ok(())
}

#[test]
fn missing_binding_fails_and_names_the_placeholder() -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse("#{Body}::new(#{Bytes}::from(x))")?;
    let mut bindings = Bindings::new();
    bindings.bind_symbol("Body", lib_symbol("Body", "lib::Full"));

    let result = template.render(&bindings);
    assert!(matches!(
        result,
        Err(RenderError::MissingBinding { placeholder, .. }) if placeholder == "Bytes"
    ));
    Ok(())
}

#[test]
fn repeated_placeholders_use_one_binding() -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse("#{Body}::empty().or(#{Body}::empty())")?;
    let mut bindings = Bindings::new();
    bindings.bind_symbol("Body", lib_symbol("Body", "lib::Full"));

    let rendered = template.render(&bindings)?;
    assert_eq!(rendered.text, "lib::Full::empty().or(lib::Full::empty())");
    assert_eq!(rendered.dependencies.len(), 1);
    Ok(())
}

#[test]
fn escaped_delimiters_render_literally() -> Result<(), Box<dyn std::error::Error>> {
    let escaped = Template::escape("#[derive(Clone)] struct T;");
    let template = Template::parse(&escaped)?;
    let rendered = template.render(&Bindings::new())?;
    assert_eq!(rendered.text, "#[derive(Clone)] struct T;");
    assert!(rendered.dependencies.is_empty());
    Ok(())
}

#[test]
fn nested_fragments_propagate_dependencies_upward() -> Result<(), Box<dyn std::error::Error>> {
    let inner = Template::parse("#{Bytes}::new()")?;
    let mut inner_bindings = Bindings::new();
    inner_bindings
        .bind_symbol("Bytes", Symbol::new("Bytes", "bytes::Bytes", DependencyEntry::version("bytes", "1")));
    let inner_rendered = inner.render(&inner_bindings)?;

    let outer = Template::parse("#{Body}::wrap(#{Payload})")?;
    let mut outer_bindings = Bindings::new();
    outer_bindings.bind_symbol(
        "Body",
        Symbol::new("Body", "http_body_util::Full", DependencyEntry::version("http-body-util", "0.1")),
    );
    outer_bindings.bind_nested("Payload", inner_rendered);

    let rendered = outer.render(&outer_bindings)?;
    assert_eq!(rendered.text, "http_body_util::Full::wrap(bytes::Bytes::new())");
    assert_eq!(rendered.dependencies.len(), 2);
    assert!(rendered.dependencies.contains(&DependencyEntry::version("bytes", "1")));
    assert!(rendered.dependencies.contains(&DependencyEntry::version("http-body-util", "0.1")));
    Ok(())
}

#[test]
fn rendering_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse("let b = #{Bytes}::new();")?;
    let mut bindings = Bindings::new();
    bindings.bind_symbol("Bytes", lib_symbol("Bytes", "lib::Bytes"));

    let first = template.render(&bindings)?;
    let second = template.render(&bindings)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn extra_bindings_are_harmless() -> Result<(), Box<dyn std::error::Error>> {
    let template = Template::parse("#{Bytes}")?;
    let mut bindings = Bindings::new();
    bindings.bind_symbol("Bytes", lib_symbol("Bytes", "lib::Bytes"));
    bindings.bind_symbol("Unused", lib_symbol("Unused", "lib::Unused"));

    let rendered = template.render(&bindings)?;
    assert_eq!(rendered.text, "lib::Bytes");
    // Only referenced symbols contribute dependencies.
    assert_eq!(rendered.dependencies.len(), 1);
    Ok(())
}
