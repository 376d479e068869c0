// crates/stencil-core/tests/dispatch_order.rs
// ============================================================================
// Module: Dispatch Order Tests
// Description: Integration tests for registry ordering and fail-fast dispatch.
// Purpose: Validate the total contribution order and section abort semantics.
// Dependencies: stencil-core
// ============================================================================

//! ## Overview
//! Integration tests covering contribution ordering (ascending priority,
//! name tie-break), decliner skipping, duplicate registration, and fail-fast
//! section dispatch.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use stencil_core::Contribution;
use stencil_core::Decorator;
use stencil_core::DecoratorError;
use stencil_core::DecoratorRegistry;
use stencil_core::DependencyEntry;
use stencil_core::DependencySet;
use stencil_core::InMemoryModel;
use stencil_core::RegistryError;
use stencil_core::RunContext;
use stencil_core::Section;
use stencil_core::SectionKind;
use stencil_core::ServiceId;
use stencil_core::StackEdition;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

struct StaticDecorator {
    name: &'static str,
    priority: i8,
    kind: SectionKind,
    text: &'static str,
    dependencies: DependencySet,
}

impl StaticDecorator {
    fn new(name: &'static str, priority: i8, kind: SectionKind, text: &'static str) -> Self {
        Self {
            name,
            priority,
            kind,
            text,
            dependencies: DependencySet::new(),
        }
    }

    fn with_dependency(mut self, entry: DependencyEntry) -> Self {
        self.dependencies.insert(entry);
        self
    }
}

impl Decorator for StaticDecorator {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> i8 {
        self.priority
    }

    fn can_contribute(&self, kind: SectionKind) -> bool {
        kind == self.kind
    }

    fn contribute(
        &self,
        _section: &Section,
        _ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        Ok(Some(Contribution {
            text: self.text.to_string(),
            dependencies: self.dependencies.clone(),
        }))
    }
}

struct DecliningDecorator;

impl Decorator for DecliningDecorator {
    fn name(&self) -> &str {
        "Declining"
    }

    fn priority(&self) -> i8 {
        0
    }

    fn can_contribute(&self, _kind: SectionKind) -> bool {
        true
    }

    fn contribute(
        &self,
        _section: &Section,
        _ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        Ok(None)
    }
}

struct FailingDecorator {
    priority: i8,
}

impl Decorator for FailingDecorator {
    fn name(&self) -> &str {
        "Failing"
    }

    fn priority(&self) -> i8 {
        self.priority
    }

    fn can_contribute(&self, _kind: SectionKind) -> bool {
        true
    }

    fn contribute(
        &self,
        _section: &Section,
        _ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        Err(DecoratorError::Contribution("synthetic failure".to_string()))
    }
}

fn re_exports_section() -> Section {
    Section::LibraryReExports {
        service: ServiceId::new("TestService"),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn lower_priority_value_contributes_first() -> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    // Registration order is the reverse of contribution order on purpose.
    let mut registry = DecoratorRegistry::new();
    registry.register(StaticDecorator::new(
        "Checksum",
        10,
        SectionKind::LibraryReExports,
        "checksum;",
    ))?;
    registry.register(StaticDecorator::new(
        "ChunkedEncoding",
        9,
        SectionKind::LibraryReExports,
        "chunked;",
    ))?;

    let output = registry.dispatch(&re_exports_section(), &ctx)?;
    assert_eq!(output.text, "chunked;checksum;");
    assert_eq!(registry.names_in_order(), ["ChunkedEncoding", "Checksum"]);
    Ok(())
}

#[test]
fn equal_priorities_order_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    let mut registry = DecoratorRegistry::new();
    registry.register(StaticDecorator::new("Beta", 5, SectionKind::LibraryReExports, "beta;"))?;
    registry.register(StaticDecorator::new("Alpha", 5, SectionKind::LibraryReExports, "alpha;"))?;

    let output = registry.dispatch(&re_exports_section(), &ctx)?;
    assert_eq!(output.text, "alpha;beta;");
    Ok(())
}

#[test]
fn decliners_are_skipped_without_error() -> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    let mut registry = DecoratorRegistry::new();
    registry.register(DecliningDecorator)?;
    registry.register(StaticDecorator::new("Only", 1, SectionKind::LibraryReExports, "only;"))?;

    let output = registry.dispatch(&re_exports_section(), &ctx)?;
    assert_eq!(output.text, "only;");
    Ok(())
}

#[test]
fn incapable_decorators_are_not_queried() -> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    let mut registry = DecoratorRegistry::new();
    registry.register(StaticDecorator::new(
        "DocsOnly",
        0,
        SectionKind::CrateDocumentation,
        "docs;",
    ))?;

    let output = registry.dispatch(&re_exports_section(), &ctx)?;
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn failure_aborts_the_section_and_discards_partial_output()
-> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    // The failing decorator sorts after "Early", which has already produced
    // text by the time the failure occurs.
    let mut registry = DecoratorRegistry::new();
    registry.register(StaticDecorator::new("Early", 0, SectionKind::LibraryReExports, "early;"))?;
    registry.register(FailingDecorator {
        priority: 1,
    })?;

    let result = registry.dispatch(&re_exports_section(), &ctx);
    let Err(err) = result else {
        panic!("dispatch must fail when a decorator fails");
    };
    let message = err.to_string();
    assert!(message.contains("Failing"), "error names the decorator: {message}");
    assert!(message.contains("library_re_exports"), "error names the section kind: {message}");
    Ok(())
}

#[test]
fn duplicate_names_are_rejected_at_registration() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = DecoratorRegistry::new();
    registry.register(StaticDecorator::new("Twice", 0, SectionKind::LibraryReExports, "a;"))?;
    let result =
        registry.register(StaticDecorator::new("Twice", 7, SectionKind::CrateDocumentation, "b;"));
    assert!(matches!(
        result,
        Err(RegistryError::Duplicate { name }) if name == "Twice"
    ));
    Ok(())
}

#[test]
fn dependency_aggregation_deduplicates_identical_entries_only()
-> Result<(), Box<dyn std::error::Error>> {
    let model = InMemoryModel::new();
    let ctx = RunContext::new(StackEdition::Http1, &model)?;

    let shared = DependencyEntry::version("bytes", "1");
    let distinct = DependencyEntry::version("bytes", "1").with_features(["serde"]);

    let mut registry = DecoratorRegistry::new();
    registry.register(
        StaticDecorator::new("First", 0, SectionKind::LibraryReExports, "a;")
            .with_dependency(shared.clone()),
    )?;
    registry.register(
        StaticDecorator::new("Second", 1, SectionKind::LibraryReExports, "b;")
            .with_dependency(shared.clone()),
    )?;
    registry.register(
        StaticDecorator::new("Third", 2, SectionKind::LibraryReExports, "c;")
            .with_dependency(distinct.clone()),
    )?;

    let output = registry.dispatch(&re_exports_section(), &ctx)?;
    assert_eq!(output.dependencies.len(), 2);
    assert!(output.dependencies.contains(&shared));
    assert!(output.dependencies.contains(&distinct));
    Ok(())
}
