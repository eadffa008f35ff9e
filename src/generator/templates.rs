use super::context::{ObjectContext, UnionContext};
use crate::model::{first_char_lower, first_char_upper, ClassModel, NamespacedClass};
use anyhow::Context;
use minijinja::Environment;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Bundled template for object classes
pub const DEFAULT_OBJECT_TEMPLATE: &str = include_str!("../../templates/object_class.java.j2");
/// Bundled template for union (alternative) classes
pub const DEFAULT_ALTERNATIVE_TEMPLATE: &str =
    include_str!("../../templates/alternative_class.java.j2");

/// The two kinds of template a pass renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Object,
    Alternative,
}

impl TemplateKind {
    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Object => "object",
            TemplateKind::Alternative => "alternative",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Template sources for one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    object: String,
    alternative: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet::new(DEFAULT_OBJECT_TEMPLATE, DEFAULT_ALTERNATIVE_TEMPLATE)
    }
}

impl TemplateSet {
    pub fn new(object: impl Into<String>, alternative: impl Into<String>) -> Self {
        TemplateSet {
            object: object.into(),
            alternative: alternative.into(),
        }
    }

    /// Read templates from files, using the bundled one for any path not given
    pub fn load(object: Option<&Path>, alternative: Option<&Path>) -> anyhow::Result<Self> {
        let read = |path: Option<&Path>, fallback: &str| -> anyhow::Result<String> {
            match path {
                Some(path) => {
                    debug!(path = %path.display(), "loading template");
                    std::fs::read_to_string(path)
                        .with_context(|| format!("Failed to read template: {}", path.display()))
                }
                None => Ok(fallback.to_string()),
            }
        };
        Ok(TemplateSet {
            object: read(object, DEFAULT_OBJECT_TEMPLATE)?,
            alternative: read(alternative, DEFAULT_ALTERNATIVE_TEMPLATE)?,
        })
    }

    pub fn source(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Object => &self.object,
            TemplateKind::Alternative => &self.alternative,
        }
    }
}

/// Renders class models through minijinja
///
/// A fresh environment is built per render, so rendering is a pure function of
/// the template source and the context.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    templates: TemplateSet,
}

impl Renderer {
    pub fn new(templates: TemplateSet) -> Self {
        Renderer { templates }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Render one template with an arbitrary serializable context
    ///
    /// # Errors
    ///
    /// Template syntax errors and render-time errors (unknown filter, failed
    /// macro call, ...).
    pub fn render<S: Serialize>(&self, kind: TemplateKind, ctx: &S) -> anyhow::Result<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("cap1st", cap1st);
        env.add_filter("uncap1st", uncap1st);
        env.add_template(kind.name(), self.templates.source(kind))
            .with_context(|| format!("Invalid {kind} template"))?;
        let template = env
            .get_template(kind.name())
            .with_context(|| format!("Missing {kind} template"))?;
        template
            .render(ctx)
            .with_context(|| format!("Failed to render {kind} template"))
    }

    /// Render a namespaced class with the template matching its kind
    ///
    /// # Errors
    ///
    /// See [`Renderer::render`].
    pub fn render_class(&self, class: &NamespacedClass) -> anyhow::Result<(TemplateKind, String)> {
        match class.model() {
            ClassModel::Object(object) => {
                let ctx = ObjectContext::new(class.namespace(), object);
                Ok((TemplateKind::Object, self.render(TemplateKind::Object, &ctx)?))
            }
            ClassModel::Union(union) => {
                let ctx = UnionContext::new(class.namespace(), union);
                Ok((
                    TemplateKind::Alternative,
                    self.render(TemplateKind::Alternative, &ctx)?,
                ))
            }
        }
    }
}

/// `cap1st` template filter
pub fn cap1st(value: String) -> String {
    first_char_upper(&value)
}

/// `uncap1st` template filter
pub fn uncap1st(value: String) -> String {
    first_char_lower(&value)
}
