use super::output::{ArtifactSink, DirectorySink};
use super::templates::{Renderer, TemplateSet};
use crate::config::GeneratorConfig;
use crate::error::CompileError;
use crate::model::{ClassModel, NamespacedClass, UnionClassModel};
use crate::schema::load_schema;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Write;
use tracing::{debug, info, warn};

/// Artifacts written by one pass, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Object classes
    pub classes: Vec<String>,
    /// Union classes
    pub alternatives: Vec<String>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.classes.len() + self.alternatives.len()
    }
}

/// Drives one generation pass: namespace, render, write
///
/// Each object class is rendered with the `object` template, then each union
/// it declares with the `alternative` template. A union already written in
/// this pass is skipped; a different union under the same name is skipped
/// with a warning.
pub struct CodeGenerator<'a, S: ArtifactSink + ?Sized> {
    renderer: &'a Renderer,
    sink: &'a S,
    namespace: String,
}

impl<'a, S: ArtifactSink + ?Sized> CodeGenerator<'a, S> {
    pub fn new(renderer: &'a Renderer, sink: &'a S, namespace: impl Into<String>) -> Self {
        CodeGenerator {
            renderer,
            sink,
            namespace: namespace.into(),
        }
    }

    /// Render and write every class of a compiled sequence
    ///
    /// Stops at the first compile, render or write error. Artifacts written
    /// before the failure are left in place.
    pub fn generate<I>(&self, models: I) -> anyhow::Result<GenerationReport>
    where
        I: IntoIterator<Item = Result<ClassModel, CompileError>>,
    {
        let mut report = GenerationReport::default();
        let mut written_unions: HashMap<String, UnionClassModel> = HashMap::new();
        for model in models {
            let class = model?.with_namespace(self.namespace.as_str());
            self.write(&class)?;
            report.classes.push(class.name().to_string());

            for union in class.unions() {
                let Some(model) = union.model().as_union() else {
                    continue;
                };
                if let Some(written) = written_unions.get(model.name()) {
                    if written.same_content(model) {
                        debug!(union = union.name(), "union already written, skipping");
                    } else {
                        warn!(
                            union = union.name(),
                            class = class.name(),
                            "union with the same name but different branches already written, skipping"
                        );
                    }
                    continue;
                }
                written_unions.insert(model.name().to_string(), model.clone());
                self.write(&union)?;
                report.alternatives.push(union.name().to_string());
            }
        }
        info!(
            namespace = %self.namespace,
            classes = report.classes.len(),
            alternatives = report.alternatives.len(),
            "generation complete"
        );
        Ok(report)
    }

    fn write(&self, class: &NamespacedClass) -> anyhow::Result<()> {
        let (kind, text) = self
            .renderer
            .render_class(class)
            .with_context(|| format!("Failed to render class {}", class.name()))?;
        let mut writer = self
            .sink
            .create_writer(class.namespace(), class.name())
            .with_context(|| format!("Failed to open artifact {}.{}", class.namespace(), class.name()))?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write artifact {}.{}", class.namespace(), class.name()))?;
        debug!(class = class.name(), template = %kind, bytes = text.len(), "artifact written");
        Ok(())
    }
}

/// Run a full pass from configuration: load, compile, render, write to disk
///
/// # Errors
///
/// Missing settings, schema load failures, template load failures, and any
/// error of [`CodeGenerator::generate`].
pub fn generate_from_config(config: &GeneratorConfig) -> anyhow::Result<GenerationReport> {
    let settings = config.resolve()?;
    let schema = load_schema(&settings.schema)?;
    let templates = TemplateSet::load(
        settings.templates.object.as_deref(),
        settings.templates.alternative.as_deref(),
    )?;
    let renderer = Renderer::new(templates);
    let sink = DirectorySink::new(&settings.output).with_extension(settings.extension.as_str());
    let compiler = config.compiler();

    info!(
        schema = %settings.schema,
        namespace = %settings.namespace,
        output = %settings.output.display(),
        "generating classes"
    );
    CodeGenerator::new(&renderer, &sink, settings.namespace.as_str())
        .generate(compiler.compile(&schema))
}
