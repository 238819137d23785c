//! Gathering: turn a registry snapshot into the jobs of one view request.

use crate::error::ViewerError;
use crate::url::UrlHandler;
use log::trace;
use patternlab_types::{Panel, PatternData};

/// How a panel's content is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// Fetch the raw file, highlight it and render it into the template.
    Fetch { url: String },
    /// Render the template straight from the pattern data.
    Render,
}

/// One branch of the panel barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelJob {
    /// Tab position among the renderable panels.
    pub index: usize,
    pub panel: Panel,
    pub kind: JobKind,
}

/// Fills in the pattern-dependent parts of each panel.
///
/// The pattern source panel carries no name; it is named after the pattern's
/// engine (or extension) and highlighted as that language. An empty
/// `httpRequestReplace` means the raw template file, `.<extension>`.
pub fn gather_panels(panels: Vec<Panel>, pattern: &PatternData) -> Vec<Panel> {
    panels
        .into_iter()
        .map(|mut panel| {
            if panel.name.is_none() {
                panel.name = Some(pattern.source_panel_name().to_string());
                panel.language = Some(pattern.pattern_extension.clone());
            }
            if panel.http_request_replace.is_empty() {
                panel.http_request_replace = format!(".{}", pattern.pattern_extension);
            }
            panel
        })
        .collect()
}

/// `<fileBase><replace>?<timestamp>`; the timestamp defeats HTTP caches.
pub fn fetch_url(file_base: &str, replace: &str, timestamp: i64) -> String {
    format!("{}{}?{}", file_base, replace, timestamp)
}

/// Plans the jobs for the renderable panels. Panels without a template id
/// take no part in the request.
pub fn plan_jobs(
    panels: Vec<Panel>,
    pattern: &PatternData,
    urls: &UrlHandler,
    timestamp: i64,
) -> Result<Vec<PanelJob>, ViewerError> {
    let partial = pattern.pattern_partial.as_str();
    let mut file_base: Option<String> = None;

    panels
        .into_iter()
        .filter(|panel| {
            let keep = panel.is_renderable();
            if !keep {
                trace!("Panel '{}' has no template, skipping", panel.id);
            }
            keep
        })
        .enumerate()
        .map(|(index, panel)| {
            let kind = if panel.http_request {
                let base = file_base.get_or_insert_with(|| urls.get_file_name(partial, false));
                if base.is_empty() {
                    return Err(ViewerError::UnknownPattern(partial.to_string()));
                }
                JobKind::Fetch {
                    url: fetch_url(base, &panel.http_request_replace, timestamp),
                }
            } else {
                JobKind::Render
            };
            Ok(PanelJob { index, panel, kind })
        })
        .collect()
}
