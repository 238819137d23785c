pub mod fixtures;

use patternlab::loader::{annotation_source, viewer_builder};
use patternlab::{BuildState, DataExporter, ExportReport, PanelsViewerBuilder, PatternLabError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A build laid out on disk: source annotations plus an export root.
pub struct BuildDir {
    pub dir: TempDir,
    pub state: BuildState,
}

impl BuildDir {
    pub fn new(state: BuildState) -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            state,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the build root, creating directories.
    pub fn write(&self, relative: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read(&self, relative: &str) -> std::io::Result<String> {
        fs::read_to_string(self.root().join(relative))
    }

    pub fn export(&self) -> Result<ExportReport, PatternLabError> {
        let exporter =
            DataExporter::new(annotation_source(&self.state, self.root())?).with_root(self.root());
        Ok(exporter.export(&self.state)?)
    }

    /// A viewer builder over the public directory of the given output dir.
    pub fn viewer(&self, output_dir: &str) -> Result<PanelsViewerBuilder, PatternLabError> {
        let annotations = annotation_source(&self.state, self.root())?;
        viewer_builder(&self.state, &self.root().join(output_dir), annotations.as_ref())
    }
}
