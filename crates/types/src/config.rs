//! Pattern Lab configuration as seen by the exporter and the viewer.
//!
//! The configuration is kept as the raw JSON object it was loaded from so the
//! exporter can reproduce it verbatim. Typed views are extracted on demand for
//! the handful of keys this workspace actually reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while reading typed sections out of the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration key: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration key '{key}': {source}")]
    Invalid {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// The `patternlab-config.json` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternLabConfig(Map<String, Value>);

impl PatternLabConfig {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    /// Parses a configuration from JSON text. The top level must be an object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `paths` section.
    pub fn paths(&self) -> Result<PathsConfig, ConfigError> {
        let raw = self.0.get("paths").ok_or(ConfigError::Missing("paths"))?;
        PathsConfig::deserialize(raw).map_err(|source| ConfigError::Invalid { key: "paths", source })
    }

    /// `ishControlsHide`, `null` when unset.
    pub fn ish_controls_hide(&self) -> Value {
        self.0.get("ishControlsHide").cloned().unwrap_or(Value::Null)
    }

    /// `defaultShowPatternInfo` when set to a truthy value.
    pub fn default_show_pattern_info(&self) -> Option<&Value> {
        self.0.get("defaultShowPatternInfo").filter(|v| is_truthy(v))
    }

    /// `defaultPattern` when set to a truthy value.
    pub fn default_pattern(&self) -> Option<&Value> {
        self.0.get("defaultPattern").filter(|v| is_truthy(v))
    }

    pub fn output_file_suffixes(&self) -> OutputFileSuffixes {
        self.0
            .get("outputFileSuffixes")
            .and_then(|v| OutputFileSuffixes::deserialize(v).ok())
            .unwrap_or_default()
    }

    /// The `uikits` list. Absent or malformed entries yield an empty list.
    pub fn uikits(&self) -> Result<Vec<UiKitConfig>, ConfigError> {
        match self.0.get("uikits") {
            None => Ok(Vec::new()),
            Some(raw) => Vec::<UiKitConfig>::deserialize(raw)
                .map_err(|source| ConfigError::Invalid { key: "uikits", source }),
        }
    }
}

/// JavaScript truthiness over JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub source: SourcePaths,
    pub public: PublicPaths,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePaths {
    #[serde(default)]
    pub annotations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicPaths {
    pub data: String,
    pub annotations: String,
    #[serde(default)]
    pub patterns: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFileSuffixes {
    #[serde(default = "default_rendered_suffix")]
    pub rendered: String,
    #[serde(default, rename = "rawTemplate")]
    pub raw_template: String,
    #[serde(default = "default_markup_only_suffix", rename = "markupOnly")]
    pub markup_only: String,
}

fn default_rendered_suffix() -> String {
    ".rendered".to_string()
}

fn default_markup_only_suffix() -> String {
    ".markup-only".to_string()
}

impl Default for OutputFileSuffixes {
    fn default() -> Self {
        Self {
            rendered: default_rendered_suffix(),
            raw_template: String::new(),
            markup_only: default_markup_only_suffix(),
        }
    }
}

/// One entry of the `uikits` configuration list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiKitConfig {
    pub name: String,
    pub output_dir: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}
