//! The pattern info panel pipeline.
//!
//! A view request runs through these stages:
//!
//! ```text
//! gather -> fetch | render (per panel) -> join -> render_view -> apply -> plugins
//! ```
//!
//! - [`gather`]: snapshot the [`PanelRegistry`] and normalize each panel
//!   against the pattern being viewed
//! - [`barrier`]: produce every panel's content concurrently and wait until
//!   all of them have settled, with a per-panel timeout
//! - [`view`]: the pure `render_view` step building the [`ViewModel`]
//! - [`apply`]: deterministic post-processing of the rendered markup
//! - [`PanelPlugin`]: extension point receiving the finished panels
//!
//! [`PanelsViewer`] ties the stages together for one request at a time; every
//! request owns its panel collection, so overlapping requests never share
//! state.

pub mod annotate;
pub mod apply;
pub mod barrier;
pub mod clipboard;
mod error;
pub mod gather;
pub mod highlight;
pub mod messages;
pub mod plugin;
pub mod registry;
pub mod resize;
pub mod templates;
pub mod url;
pub mod view;
mod viewer;

pub use barrier::PanelEvent;
pub use error::{PanelFailure, ViewerError};
pub use highlight::{Highlighter, MarkupHighlighter};
pub use messages::{FrameMessage, TargetOrigin};
pub use plugin::{FrameHost, PanelPlugin, RecordingFrameHost};
pub use registry::PanelRegistry;
pub use templates::TemplateStore;
pub use url::UrlHandler;
pub use view::{LineageLink, RenderedPanels, ViewModel, render_view};
pub use viewer::{DEFAULT_FETCH_TIMEOUT, PanelsViewer, PanelsViewerBuilder, ViewRequest, ViewerOptions};
