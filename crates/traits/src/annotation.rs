//! AnnotationSource trait: where the exporter gets annotation comments from.

use patternlab_types::AnnotationComment;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Failed to read annotations from '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid annotation in '{path}': {message}")]
    Invalid { path: String, message: String },
}

/// Gathers the ordered list of annotation comments for a build.
pub trait AnnotationSource: Send + Sync + Debug {
    fn gather(&self) -> Result<Vec<AnnotationComment>, AnnotationError>;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A fixed list of comments.
#[derive(Debug, Clone, Default)]
pub struct StaticAnnotationSource {
    comments: Vec<AnnotationComment>,
}

impl StaticAnnotationSource {
    pub fn new(comments: Vec<AnnotationComment>) -> Self {
        Self { comments }
    }
}

impl AnnotationSource for StaticAnnotationSource {
    fn gather(&self) -> Result<Vec<AnnotationComment>, AnnotationError> {
        Ok(self.comments.clone())
    }

    fn name(&self) -> &'static str {
        "StaticAnnotationSource"
    }
}
