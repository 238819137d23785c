//! Wiring the export and viewer crates to files on disk.

use crate::error::PatternLabError;
use log::debug;
use patternlab_export::FilesystemAnnotationSource;
use patternlab_resource::FilesystemPatternSource;
use patternlab_traits::{AnnotationSource, StaticAnnotationSource};
use patternlab_types::{BuildState, PatternData};
use patternlab_viewer::{PanelsViewerBuilder, UrlHandler};
use std::fs;
use std::path::Path;
use std::sync::Arc;

fn read(path: &Path) -> Result<String, PatternLabError> {
    fs::read_to_string(path).map_err(|source| PatternLabError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a build state snapshot (`{ "config": ..., "patternPaths": ... }`).
pub fn read_build_state(path: &Path) -> Result<BuildState, PatternLabError> {
    Ok(BuildState::from_json(&read(path)?)?)
}

/// Reads the data of a single pattern, as embedded in its rendered page.
pub fn read_pattern_data(path: &Path) -> Result<PatternData, PatternLabError> {
    Ok(PatternData::from_json(&read(path)?)?)
}

/// The annotation source configured under `paths.source.annotations`,
/// resolved against `root`. Builds without one get an empty source.
pub fn annotation_source(
    state: &BuildState,
    root: &Path,
) -> Result<Arc<dyn AnnotationSource>, PatternLabError> {
    let paths = state.config.paths()?;
    Ok(match paths.source.annotations {
        Some(dir) => Arc::new(FilesystemAnnotationSource::new(root.join(dir))),
        None => {
            debug!("No source annotations directory configured");
            Arc::new(StaticAnnotationSource::new(Vec::new()))
        }
    })
}

/// A viewer builder serving pattern files from an exported public
/// directory, configured from the build's paths, suffixes and annotations.
pub fn viewer_builder(
    state: &BuildState,
    public_dir: &Path,
    annotations: &dyn AnnotationSource,
) -> Result<PanelsViewerBuilder, PatternLabError> {
    let comments = annotations.gather()?;
    debug!(
        "Loaded {} annotation(s) from {}",
        comments.len(),
        annotations.name()
    );
    Ok(PanelsViewerBuilder::new()
        .with_source(Arc::new(FilesystemPatternSource::new(public_dir)))
        .with_url_handler(UrlHandler::from_build_state(state))
        .with_output_file_suffixes(state.config.output_file_suffixes())
        .with_comments(comments))
}
