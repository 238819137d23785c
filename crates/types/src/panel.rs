//! Panel descriptors: one tab of content in the pattern info view.

use crate::ids::PanelId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,
    /// Tab label. The pattern source panel leaves this unset and receives the
    /// pattern's engine name or extension when gathered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Template used to render the panel. Panels without one are never
    /// fetched, rendered or waited on.
    #[serde(default, rename = "templateID", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub http_request: bool,
    /// Suffix appended to the pattern's file base when fetching. Empty means
    /// "the raw template", i.e. `.<extension>`.
    #[serde(default)]
    pub http_request_replace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_combo: Option<String>,
}

impl Panel {
    pub fn new(id: impl Into<PanelId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            template_id: None,
            http_request: false,
            http_request_replace: String::new(),
            language: None,
            default: false,
            key_combo: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Marks the panel as fetched over HTTP using the given file suffix.
    pub fn with_http_request(mut self, replace: impl Into<String>) -> Self {
        self.http_request = true;
        self.http_request_replace = replace.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// True when the panel takes part in a view request at all.
    pub fn is_renderable(&self) -> bool {
        self.template_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// A panel whose content has been produced for one view request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedPanel {
    #[serde(flatten)]
    pub panel: Panel,
    pub content: String,
}
