//! The set of panels shown for every pattern.

use patternlab_types::{OutputFileSuffixes, Panel};

pub const PATTERN_PANEL_ID: &str = "pl-panel-pattern";
pub const HTML_PANEL_ID: &str = "pl-panel-html";
pub const CODE_TEMPLATE_ID: &str = "pl-panel-template-code";

/// Registered panels, in tab order.
///
/// Plugins register extra panels here before a view request; each request
/// works on its own snapshot from [`get`](Self::get).
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pattern source panel followed by the markup-only HTML panel.
    pub fn with_defaults(suffixes: &OutputFileSuffixes) -> Self {
        let mut registry = Self::new();
        let mut pattern = Panel::new(PATTERN_PANEL_ID)
            .with_template(CODE_TEMPLATE_ID)
            .with_http_request(suffixes.raw_template.clone())
            .as_default();
        pattern.key_combo = Some("ctrl+shift+u".to_string());

        let mut html = Panel::new(HTML_PANEL_ID)
            .with_name("HTML")
            .with_template(CODE_TEMPLATE_ID)
            .with_http_request(format!("{}.html", suffixes.markup_only))
            .with_language("markup");
        html.key_combo = Some("ctrl+shift+y".to_string());

        registry.add(pattern);
        registry.add(html);
        registry
    }

    /// Adds a panel. Returns `false` and leaves the registry unchanged when a
    /// panel with the same id is already registered.
    pub fn add(&mut self, panel: Panel) -> bool {
        if self.panels.iter().any(|p| p.id == panel.id) {
            return false;
        }
        self.panels.push(panel);
        true
    }

    /// Removes the panel with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| p.id.as_str() != id);
        self.panels.len() != before
    }

    /// An owned snapshot of the registered panels.
    pub fn get(&self) -> Vec<Panel> {
        self.panels.clone()
    }

    pub fn count(&self) -> usize {
        self.panels.len()
    }
}
