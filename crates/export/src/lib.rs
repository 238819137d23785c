//! Data export for the Pattern Lab front end.
//!
//! After a build finishes, the viewer needs the configuration, the navigation
//! tree, the pattern path maps and the annotation comments. This crate turns a
//! [`BuildState`](patternlab_types::BuildState) into the two script files the
//! browser loads, once per output target:
//!
//! - `<outputDir>/<paths.public.data>/patternlab-data.js`
//! - `<outputDir>/<paths.public.annotations>/annotations.js`

mod annotations;
mod error;
mod exporter;

pub use annotations::FilesystemAnnotationSource;
pub use error::ExportError;
pub use exporter::{ANNOTATIONS_FILE, DATA_FILE, DataExporter, ExportReport};
