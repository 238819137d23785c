//! Per-pattern records produced by the build step.

use crate::ids::PatternPartial;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One related pattern in a lineage list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageEntry {
    pub lineage_pattern: String,
    #[serde(default)]
    pub lineage_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage_state: Option<String>,
    /// Set on every entry except the last so templates can join with commas.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_comma: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineageEntry {
    pub fn new(pattern: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            lineage_pattern: pattern.into(),
            lineage_path: path.into(),
            ..Default::default()
        }
    }
}

/// The pattern being viewed, as embedded in the rendered pattern page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternData {
    pub pattern_partial: PatternPartial,
    #[serde(default)]
    pub pattern_name: String,
    #[serde(default)]
    pub pattern_extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_engine_name: Option<String>,
    #[serde(default)]
    pub pattern_desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_desc_additions: Option<Vec<Value>>,
    /// Consumed by annotation matching and never handed to templates.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern_markup: String,
    #[serde(default)]
    pub lineage: Vec<LineageEntry>,
    #[serde(default, rename = "lineageR")]
    pub lineage_r: Vec<LineageEntry>,
    #[serde(default)]
    pub pattern_state: String,
    /// Anything else the build step attached; passed through to templates.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatternData {
    pub fn new(
        partial: impl Into<PatternPartial>,
        name: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            pattern_partial: partial.into(),
            pattern_name: name.into(),
            pattern_extension: extension.into(),
            pattern_engine_name: None,
            pattern_desc: String::new(),
            pattern_desc_additions: None,
            pattern_markup: String::new(),
            lineage: Vec::new(),
            lineage_r: Vec::new(),
            pattern_state: String::new(),
            extra: Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The display name of the pattern's source panel: the engine name when
    /// the build recorded one, otherwise the bare file extension.
    pub fn source_panel_name(&self) -> &str {
        self.pattern_engine_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.pattern_extension)
    }
}
