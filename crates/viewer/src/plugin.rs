//! Extension points around a view request.

use crate::error::ViewerError;
use crate::messages::{FrameMessage, TargetOrigin};
use crate::view::RenderedPanels;
use std::fmt::Debug;
use std::sync::Mutex;

/// Receives the finished panels of every view request and may add to them.
pub trait PanelPlugin: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn insert_panels(&self, panels: &mut RenderedPanels) -> Result<(), ViewerError>;
}

/// The window hosting the pattern iframe.
pub trait FrameHost: Send + Sync + Debug {
    /// Posts a serialized [`FrameMessage`] to the pattern iframe.
    fn post_message(&self, message: &str, target_origin: &TargetOrigin);
}

/// A [`FrameHost`] that keeps every posted message.
#[derive(Debug, Default)]
pub struct RecordingFrameHost {
    posted: Mutex<Vec<(String, TargetOrigin)>>,
}

impl RecordingFrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posted messages, oldest first.
    pub fn posted(&self) -> Vec<(String, TargetOrigin)> {
        self.posted
            .lock()
            .map(|posted| posted.clone())
            .unwrap_or_default()
    }

    /// Posted messages decoded back into [`FrameMessage`]s.
    pub fn messages(&self) -> Vec<FrameMessage> {
        self.posted()
            .iter()
            .filter_map(|(json, _)| serde_json::from_str(json).ok())
            .collect()
    }
}

impl FrameHost for RecordingFrameHost {
    fn post_message(&self, message: &str, target_origin: &TargetOrigin) {
        if let Ok(mut posted) = self.posted.lock() {
            posted.push((message.to_string(), target_origin.clone()));
        }
    }
}
