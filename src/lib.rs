//! Pattern Lab front-end data.
//!
//! Two independent halves share this workspace:
//!
//! - [`DataExporter`] writes `patternlab-data.js` and `annotations.js` for
//!   every output target after a build.
//! - [`PanelsViewer`] produces the pattern info panels (code, HTML,
//!   annotations, lineage) for one pattern at a time.
//!
//! The [`loader`] module connects both to files on disk; the `patternlab`
//! binary is a thin command line over it.

mod error;
pub mod loader;

pub use error::PatternLabError;

pub use patternlab_export::{
    ANNOTATIONS_FILE, DATA_FILE, DataExporter, ExportError, ExportReport, FilesystemAnnotationSource,
};
pub use patternlab_resource::FilesystemPatternSource;
pub use patternlab_traits::{
    AnnotationError, AnnotationSource, InMemoryPatternSource, PatternSource, SourceError,
    StaticAnnotationSource,
};
pub use patternlab_types::{
    Annotation, AnnotationComment, BuildState, CollectedPanel, LineageEntry, Panel, PanelId,
    PatternData, PatternLabConfig, PatternPartial,
};
pub use patternlab_viewer::{
    FrameHost, FrameMessage, PanelEvent, PanelPlugin, PanelRegistry, PanelsViewer,
    PanelsViewerBuilder, RecordingFrameHost, RenderedPanels, TargetOrigin, TemplateStore,
    UrlHandler, ViewRequest, ViewerError, ViewerOptions,
};
