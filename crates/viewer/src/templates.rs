use crate::error::ViewerError;
use crate::registry::CODE_TEMPLATE_ID;
use handlebars::Handlebars;
use serde::Serialize;

/// The template wrapping all panels of a pattern.
pub const BASE_TEMPLATE_ID: &str = "pl-panel-template-base";

const CODE_TEMPLATE: &str = include_str!("../templates/panel-code.hbs");
const BASE_TEMPLATE: &str = include_str!("../templates/panel-base.hbs");

/// Compiled panel templates, keyed by template id.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    registry: Handlebars<'static>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            registry: Handlebars::new(),
        }
    }

    /// A store holding the built-in code and base templates.
    pub fn with_builtin() -> Result<Self, ViewerError> {
        let mut store = Self::new();
        store.register(CODE_TEMPLATE_ID, CODE_TEMPLATE)?;
        store.register(BASE_TEMPLATE_ID, BASE_TEMPLATE)?;
        Ok(store)
    }

    /// Compiles and registers a template, replacing any previous one with the
    /// same id.
    pub fn register(&mut self, id: &str, source: &str) -> Result<(), ViewerError> {
        self.registry
            .register_template_string(id, source)
            .map_err(|e| ViewerError::TemplateCompile {
                id: id.to_string(),
                message: e.to_string(),
            })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.has_template(id)
    }

    pub fn render<T: Serialize>(&self, id: &str, data: &T) -> Result<String, ViewerError> {
        if !self.contains(id) {
            return Err(ViewerError::MissingTemplate(id.to_string()));
        }
        self.registry
            .render(id, data)
            .map_err(|e| ViewerError::Template {
                id: id.to_string(),
                message: e.to_string(),
            })
    }
}
