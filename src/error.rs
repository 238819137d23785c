use patternlab_export::ExportError;
use patternlab_traits::{AnnotationError, SourceError};
use patternlab_types::ConfigError;
use patternlab_viewer::ViewerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the `patternlab` front end.
#[derive(Error, Debug)]
pub enum PatternLabError {
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Panels failed: {0}")]
    Viewer(#[from] ViewerError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Annotation error: {0}")]
    Annotations(#[from] AnnotationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
