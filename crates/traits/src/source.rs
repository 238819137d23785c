//! PatternSource trait for abstracting pattern file retrieval.
//!
//! The viewer fetches raw pattern sources (the template, the markup-only
//! output) by request path. This trait lets it do so without being tied to a
//! web server, a filesystem, or anything else.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for pattern source operations.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Pattern file not found: {0}")]
    NotFound(String),

    #[error("Failed to load pattern file '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Pattern file is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

/// Shared file data type (reference-counted bytes).
pub type SharedSourceData = Arc<Vec<u8>>;

/// Drops the `?query` part of a request path. The viewer appends a
/// timestamp query to every fetch to defeat caches.
pub fn strip_query(request_path: &str) -> &str {
    request_path
        .split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(request_path)
}

/// A trait for loading generated pattern files.
///
/// Implementations:
///
/// - `FilesystemPatternSource` (patternlab-resource): reads from a public dir
/// - `InMemoryPatternSource`: pre-populated memory, used by tests and embedders
///
/// Loads are blocking; the viewer runs them on the blocking pool.
pub trait PatternSource: Send + Sync + Debug {
    /// Load a file by its request path. Any `?query` suffix is ignored.
    fn load(&self, request_path: &str) -> Result<SharedSourceData, SourceError>;

    /// Load a file and decode it as UTF-8 text.
    fn load_text(&self, request_path: &str) -> Result<String, SourceError> {
        let bytes = self.load(request_path)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| SourceError::InvalidEncoding(strip_query(request_path).to_string()))
    }

    /// Check if a file exists.
    fn exists(&self, request_path: &str) -> bool;

    /// Returns a human-readable name for this source (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory pattern source.
#[derive(Debug, Default)]
pub struct InMemoryPatternSource {
    files: RwLock<HashMap<String, SharedSourceData>>,
}

impl InMemoryPatternSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::LoadFailed` if the internal lock is poisoned.
    pub fn add(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Result<(), SourceError> {
        let path_string = path.into();
        let mut files = self.files.write().map_err(|_| SourceError::LoadFailed {
            path: path_string.clone(),
            message: "pattern store lock poisoned".to_string(),
        })?;
        files.insert(path_string, Arc::new(data.into()));
        Ok(())
    }

    /// Builder-style variant of [`add`](Self::add) for test setup.
    pub fn with_file(self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), Arc::new(data.into()));
        }
        self
    }

    /// Remove a file from the store.
    ///
    /// Returns `None` if the lock is poisoned or the file doesn't exist.
    pub fn remove(&self, path: &str) -> Option<SharedSourceData> {
        self.files.write().ok()?.remove(path)
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.files.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.files.read().map(|r| r.is_empty()).unwrap_or(true)
    }
}

impl PatternSource for InMemoryPatternSource {
    fn load(&self, request_path: &str) -> Result<SharedSourceData, SourceError> {
        let path = strip_query(request_path);
        let files = self.files.read().map_err(|_| SourceError::LoadFailed {
            path: path.to_string(),
            message: "pattern store lock poisoned".to_string(),
        })?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }

    fn exists(&self, request_path: &str) -> bool {
        self.files
            .read()
            .map(|r| r.contains_key(strip_query(request_path)))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryPatternSource"
    }
}
