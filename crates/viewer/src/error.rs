use patternlab_traits::SourceError;
use patternlab_types::PanelId;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building the panels for a view request.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Viewer configuration error: {0}")]
    Config(String),

    #[error("Template '{0}' is not registered")]
    MissingTemplate(String),

    #[error("Template '{id}' failed to compile: {message}")]
    TemplateCompile { id: String, message: String },

    #[error("Template '{id}' failed to render: {message}")]
    Template { id: String, message: String },

    #[error("Pattern '{0}' has no known file path")]
    UnknownPattern(String),

    #[error("Panel '{panel}' could not fetch its source: {source}")]
    PanelFetch {
        panel: PanelId,
        #[source]
        source: SourceError,
    },

    #[error("Panel '{panel}' did not complete within {after:?}")]
    PanelTimedOut { panel: PanelId, after: Duration },

    #[error("Panel task failed: {0}")]
    Task(String),

    #[error("{} panel(s) failed: {}", .failures.len(), describe_failures(.failures))]
    PanelsFailed { failures: Vec<PanelFailure> },

    #[error("Plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One branch of the panel barrier that did not produce content.
#[derive(Debug)]
pub struct PanelFailure {
    pub panel: PanelId,
    pub error: ViewerError,
}

fn describe_failures(failures: &[PanelFailure]) -> String {
    failures
        .iter()
        .map(|f| f.error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
