//! Newtype wrappers for pattern and panel identifiers
//!
//! These keep pattern partials (`atoms-logo`) and panel ids (`pl-panel-html`)
//! from being mixed up when they travel through the viewer together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The unique identifier of a pattern within the library (e.g. `atoms-logo`).
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternPartial(Arc<str>);

impl PatternPartial {
    /// Creates a new PatternPartial from a string
    pub fn new(partial: impl Into<Arc<str>>) -> Self {
        Self(partial.into())
    }

    /// Returns the string representation of this partial
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `viewall-` pseudo partials that address a whole group.
    pub fn is_view_all(&self) -> bool {
        self.0.starts_with("viewall-")
    }
}

impl From<String> for PatternPartial {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for PatternPartial {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for PatternPartial {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternPartial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifier of a panel (tab) in the pattern info view.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(Arc<str>);

impl PanelId {
    /// Creates a new PanelId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this panel id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PanelId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for PanelId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for PanelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
