//! Filesystem-based pattern source.
//!
//! Serves the files the build wrote into a public directory, the same files a
//! web server would hand the viewer. Request paths are resolved relative to
//! that directory and may not escape it.

use log::debug;
use patternlab_traits::{PatternSource, SharedSourceData, SourceError, strip_query};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A pattern source reading from a public output directory.
#[derive(Debug)]
pub struct FilesystemPatternSource {
    public_dir: PathBuf,
    /// Canonicalized public dir for traversal checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemPatternSource {
    pub fn new<P: AsRef<Path>>(public_dir: P) -> Self {
        let base = public_dir.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            public_dir: base,
            canonical_base: canonical,
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Resolves a request path below the public dir.
    ///
    /// Returns `None` for absolute paths and for paths escaping the public dir.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = strip_query(request_path).trim_start_matches("./");
        if relative.is_empty() || Path::new(relative).is_absolute() {
            return None;
        }

        let full_path = self.public_dir.join(relative);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        if Path::new(relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl PatternSource for FilesystemPatternSource {
    fn load(&self, request_path: &str) -> Result<SharedSourceData, SourceError> {
        let full_path = self.resolve(request_path).ok_or_else(|| {
            SourceError::NotFound(format!("{} (outside public dir)", strip_query(request_path)))
        })?;
        debug!("Loading pattern file {}", full_path.display());

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(strip_query(request_path).to_string())
            } else {
                SourceError::LoadFailed {
                    path: strip_query(request_path).to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, request_path: &str) -> bool {
        self.resolve(request_path).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemPatternSource"
    }
}
