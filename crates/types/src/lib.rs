pub mod annotation;
pub mod config;
pub mod ids;
pub mod panel;
pub mod pattern;
pub mod state;

pub use annotation::{Annotation, AnnotationComment, CommentsPayload};
pub use config::{is_truthy, ConfigError, OutputFileSuffixes, PathsConfig, PatternLabConfig, PublicPaths, SourcePaths, UiKitConfig};
pub use ids::{PanelId, PatternPartial};
pub use panel::{CollectedPanel, Panel};
pub use pattern::{LineageEntry, PatternData};
pub use state::{BuildState, UiKit};
