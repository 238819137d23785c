use patternlab_traits::AnnotationError;
use patternlab_types::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Annotation gathering failed: {0}")]
    Annotations(#[from] AnnotationError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}
