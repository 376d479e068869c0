// crates/stencil-core/examples/minimal.rs
// ============================================================================
// Module: Stencil Minimal Example
// Description: Minimal end-to-end generation pass using in-memory adapters.
// Purpose: Demonstrate decorator authoring, dispatch, and artifact hand-off.
// Dependencies: stencil-core
// ============================================================================

//! ## Overview
//! Runs a minimal generation pass: one service with two operations, one
//! custom decorator, one edition. The finalized artifact is handed to an
//! in-memory writer, the way a real host would hand it to a filesystem
//! writer and manifest emitter.

use std::collections::BTreeMap;

use stencil_core::Artifact;
use stencil_core::ArtifactWriter;
use stencil_core::Bindings;
use stencil_core::Contribution;
use stencil_core::Decorator;
use stencil_core::DecoratorError;
use stencil_core::DecoratorRegistry;
use stencil_core::InMemoryModel;
use stencil_core::LogicalName;
use stencil_core::ModelView;
use stencil_core::OperationId;
use stencil_core::OutputLocation;
use stencil_core::RunContext;
use stencil_core::Section;
use stencil_core::SectionKind;
use stencil_core::ServiceId;
use stencil_core::StackEdition;
use stencil_core::Template;
use stencil_core::TraitId;
use stencil_core::WriterError;

/// Contributes a request-builder helper for every operation.
struct RequestBuilderDecorator;

impl Decorator for RequestBuilderDecorator {
    fn name(&self) -> &str {
        "RequestBuilder"
    }

    fn priority(&self) -> i8 {
        0
    }

    fn can_contribute(&self, kind: SectionKind) -> bool {
        kind == SectionKind::OperationCustomization
    }

    fn contribute(
        &self,
        section: &Section,
        ctx: &RunContext<'_>,
    ) -> Result<Option<Contribution>, DecoratorError> {
        let Section::OperationCustomization {
            operation, ..
        } = section
        else {
            return Ok(None);
        };
        let pattern = format!(
            "fn {name}_request() -> #{{HttpRequest}}<#{{Body}}> {{\n    \
             #{{HttpRequest}}::new(#{{Body}}::default())\n}}\n",
            name = Template::escape(&operation.as_str().to_lowercase()),
        );
        let template = Template::parse(&pattern)?;
        let mut bindings = Bindings::new();
        bindings.bind_symbol("HttpRequest", ctx.resolve(&LogicalName::new("HttpRequest"))?);
        bindings.bind_symbol("Body", ctx.resolve(&LogicalName::new("Body"))?);
        Ok(Some(template.render(&bindings)?.into()))
    }
}

/// In-memory artifact writer used by the example.
#[derive(Default)]
struct InMemoryWriter {
    /// Written buffers keyed by output location.
    files: BTreeMap<String, String>,
}

impl ArtifactWriter for InMemoryWriter {
    fn write(&mut self, artifact: &Artifact) -> Result<(), WriterError> {
        for (location, text) in artifact.buffers() {
            self.files.insert(location.to_string(), text.to_string());
        }
        let manifest = artifact
            .dependencies_json()
            .map_err(|err| WriterError::Writer(err.to_string()))?;
        self.files.insert("dependencies.json".to_string(), manifest.to_string());
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut model = InMemoryModel::new();
    let service = ServiceId::new("Storage");
    model.add_service(service.clone(), Some("Object storage client.".to_string()));
    model.add_operation(&service, OperationId::new("PutObject"), [TraitId::new("streaming")]);
    model.add_operation(&service, OperationId::new("GetObject"), []);

    let ctx = RunContext::new(StackEdition::Http1, &model)?;
    let mut registry = DecoratorRegistry::new();
    registry.register(RequestBuilderDecorator)?;

    let mut artifact = Artifact::new();
    for service in model.services() {
        for operation in model.operations_of(&service) {
            let section = Section::OperationCustomization {
                service: service.clone(),
                operation,
            };
            let output = registry.dispatch(&section, &ctx)?;
            artifact.append(OutputLocation::new("src/operations.rs"), output);
        }
    }

    let mut writer = InMemoryWriter::default();
    writer.write(&artifact)?;
    let _ = writer.files;
    Ok(())
}
