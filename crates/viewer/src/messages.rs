//! Messages posted to the pattern iframe.

use patternlab_types::Annotation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cross-frame protocol, serialized as `{"event": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum FrameMessage {
    /// Ask the pattern to highlight the elements the annotations point at.
    #[serde(rename = "patternLab.annotationsHighlightShow")]
    AnnotationsHighlightShow { annotations: Vec<Annotation> },
    /// Navigate the pattern iframe to another pattern.
    #[serde(rename = "patternLab.updatePath")]
    UpdatePath { path: String },
}

impl FrameMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The origin messages are restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetOrigin {
    /// `*`; pages opened from `file:` have no usable origin.
    #[default]
    Any,
    Origin(String),
}

impl TargetOrigin {
    /// The origin of a page given its location's protocol (`"https:"`) and
    /// host (`"localhost:3000"`).
    pub fn for_page(protocol: &str, host: &str) -> Self {
        if protocol == "file:" {
            TargetOrigin::Any
        } else {
            TargetOrigin::Origin(format!("{}//{}", protocol, host))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TargetOrigin::Any => "*",
            TargetOrigin::Origin(origin) => origin,
        }
    }
}

impl fmt::Display for TargetOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
