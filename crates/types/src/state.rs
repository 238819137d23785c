//! The build state handed over by the static-site build step.

use crate::config::{ConfigError, PatternLabConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An output target. Every enabled uikit receives its own copy of the
/// exported data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiKit {
    pub name: String,
    pub output_dir: String,
}

/// In-memory snapshot of a finished build: configuration plus the
/// pre-computed pattern collections the front end consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildState {
    pub config: PatternLabConfig,
    #[serde(default)]
    pub pattern_types: Value,
    #[serde(default)]
    pub pattern_paths: Value,
    #[serde(default)]
    pub view_all_paths: Value,
    #[serde(default)]
    pub plugins: Option<Value>,
    /// Explicit output targets. When empty, the enabled entries of
    /// `config.uikits` are used instead.
    #[serde(default)]
    pub uikits: Vec<UiKit>,
}

impl BuildState {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The output targets the exporter writes to.
    pub fn output_targets(&self) -> Result<Vec<UiKit>, ConfigError> {
        if !self.uikits.is_empty() {
            return Ok(self.uikits.clone());
        }
        Ok(self
            .config
            .uikits()?
            .into_iter()
            .filter(|kit| kit.enabled)
            .map(|kit| UiKit {
                name: kit.name,
                output_dir: kit.output_dir,
            })
            .collect())
    }

    /// The plugin list, `[]` when the build registered none.
    pub fn plugins_or_empty(&self) -> Value {
        self.plugins.clone().unwrap_or_else(|| Value::Array(Vec::new()))
    }
}
