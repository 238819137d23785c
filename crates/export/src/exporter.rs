use crate::error::ExportError;
use log::{debug, info};
use patternlab_traits::AnnotationSource;
use patternlab_types::{BuildState, CommentsPayload};
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DATA_FILE: &str = "patternlab-data.js";
pub const ANNOTATIONS_FILE: &str = "annotations.js";

/// What an export run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// The `patternlab-data.js` body, identical for every target.
    pub data: String,
    /// The `annotations.js` body, identical for every target.
    pub annotations: String,
    /// Every file written, in write order.
    pub written: Vec<PathBuf>,
}

/// Writes the front-end data files for a build.
#[derive(Debug, Clone)]
pub struct DataExporter {
    annotations: Arc<dyn AnnotationSource>,
    root: Option<PathBuf>,
}

impl DataExporter {
    pub fn new(annotations: Arc<dyn AnnotationSource>) -> Self {
        Self {
            annotations,
            root: None,
        }
    }

    /// Resolve output directories against `root` instead of the process
    /// working directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Builds the `patternlab-data.js` body.
    pub fn render_data(state: &BuildState) -> Result<String, ExportError> {
        let config = &state.config;
        let ish_controls_hide = serde_json::to_string(&config.ish_controls_hide())?;

        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(output, "var config = {};", serde_json::to_string(config)?);
        let _ = writeln!(
            output,
            "var ishControls = {{\"ishControlsHide\":{}}};",
            ish_controls_hide
        );
        let _ = writeln!(
            output,
            "var navItems = {{\"patternTypes\": {}, \"ishControlsHide\": {}}};",
            serde_json::to_string(&state.pattern_types)?,
            ish_controls_hide
        );
        let _ = writeln!(
            output,
            "var patternPaths = {};",
            serde_json::to_string(&state.pattern_paths)?
        );
        let _ = writeln!(
            output,
            "var viewAllPaths = {};",
            serde_json::to_string(&state.view_all_paths)?
        );
        let _ = writeln!(
            output,
            "var plugins = {};",
            serde_json::to_string(&state.plugins_or_empty())?
        );

        let show_info = match config.default_show_pattern_info() {
            // Strings are written as-is, so `"true"` becomes the literal `true`.
            Some(Value::String(s)) => s.clone(),
            Some(value) => serde_json::to_string(value)?,
            None => "false".to_string(),
        };
        let _ = writeln!(output, "var defaultShowPatternInfo = {};", show_info);

        let default_pattern = match config.default_pattern() {
            Some(Value::String(s)) => serde_json::to_string(s)?,
            Some(other) => serde_json::to_string(&other.to_string())?,
            None => "\"all\"".to_string(),
        };
        let _ = writeln!(output, "var defaultPattern = {};", default_pattern);

        Ok(output)
    }

    /// Builds the `annotations.js` body from the annotation source.
    pub fn render_annotations(&self) -> Result<String, ExportError> {
        let payload = CommentsPayload {
            comments: self.annotations.gather()?,
        };
        debug!(
            "Gathered {} annotation(s) from {}",
            payload.comments.len(),
            self.annotations.name()
        );
        Ok(format!(
            "var comments = {{ \"comments\" : {}}};",
            serde_json::to_string(&payload.comments)?
        ))
    }

    /// Writes `annotations.js` and `patternlab-data.js` for every output
    /// target, replacing existing files and creating directories as needed.
    pub fn export(&self, state: &BuildState) -> Result<ExportReport, ExportError> {
        let paths = state.config.paths()?;
        let targets = state.output_targets()?;
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(ExportError::WorkingDir)?,
        };

        let data = Self::render_data(state)?;
        let annotations = self.render_annotations()?;
        let mut written = Vec::with_capacity(targets.len() * 2);

        for kit in &targets {
            let path = root
                .join(&kit.output_dir)
                .join(&paths.public.annotations)
                .join(ANNOTATIONS_FILE);
            write_file(&path, &annotations)?;
            written.push(path);
        }

        for kit in &targets {
            let path = root
                .join(&kit.output_dir)
                .join(&paths.public.data)
                .join(DATA_FILE);
            write_file(&path, &data)?;
            written.push(path);
        }

        info!(
            "Exported pattern data for {} output target(s)",
            targets.len()
        );

        Ok(ExportReport {
            data,
            annotations,
            written,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let to_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    fs::write(path, contents).map_err(to_err)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
