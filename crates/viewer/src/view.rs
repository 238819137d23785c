//! The pure rendering step: pattern data plus collected panels in, a view
//! model out. Nothing here touches markup that has already been rendered.

use crate::annotate::match_annotations;
use crate::error::ViewerError;
use crate::messages::FrameMessage;
use crate::templates::{BASE_TEMPLATE_ID, TemplateStore};
use patternlab_types::{Annotation, AnnotationComment, CollectedPanel, LineageEntry, PatternData, PatternPartial};
use serde::Serialize;

/// Everything the base template sees: the pattern's own data followed by the
/// derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    #[serde(flatten)]
    pub pattern: PatternData,
    pub pattern_name_caps: String,
    pub annotations: Vec<Annotation>,
    pub pattern_desc_exists: bool,
    pub lineage_exists: bool,
    #[serde(rename = "lineageRExists")]
    pub lineage_r_exists: bool,
    pub pattern_state_exists: bool,
    pub annotation_exists: bool,
    pub desc_block_exists: bool,
    pub is_pattern_view: bool,
    pub panels: Vec<CollectedPanel>,
}

impl ViewModel {
    /// Messages the pattern iframe should receive once this view is shown.
    pub fn frame_messages(&self) -> Vec<FrameMessage> {
        if self.annotations.is_empty() {
            return Vec::new();
        }
        vec![FrameMessage::AnnotationsHighlightShow {
            annotations: self.annotations.clone(),
        }]
    }
}

/// A lineage link in the rendered panels and the page it navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageLink {
    pub partial: String,
    pub path: String,
}

/// The finished output of one view request, as handed to plugins.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPanels {
    pub partial: PatternPartial,
    /// The base template output wrapped in `div.pl-c-pattern-info`, with
    /// default tabs activated.
    pub html: String,
    pub annotations: Vec<Annotation>,
    pub lineage_links: Vec<LineageLink>,
    /// Messages posted to the pattern iframe for this view.
    pub messages: Vec<FrameMessage>,
    pub iframe_passback: bool,
    pub switch_text: bool,
}

/// Builds the view model for a pattern.
///
/// The pattern's markup is consumed by annotation matching and dropped from
/// the model.
pub fn render_view(
    mut pattern: PatternData,
    panels: Vec<CollectedPanel>,
    comments: &[AnnotationComment],
    iframe_passback: bool,
) -> ViewModel {
    let markup = std::mem::take(&mut pattern.pattern_markup);
    let annotations = match_annotations(&markup, comments);

    mark_commas(&mut pattern.lineage);
    mark_commas(&mut pattern.lineage_r);

    let pattern_desc_exists = !pattern.pattern_desc.is_empty()
        || pattern
            .pattern_desc_additions
            .as_ref()
            .is_some_and(|additions| !additions.is_empty());
    let lineage_exists = !pattern.lineage.is_empty();
    let lineage_r_exists = !pattern.lineage_r.is_empty();
    let pattern_state_exists = !pattern.pattern_state.is_empty();
    let annotation_exists = !annotations.is_empty();

    ViewModel {
        pattern_name_caps: pattern.pattern_name.to_uppercase(),
        desc_block_exists: pattern_desc_exists
            || lineage_exists
            || lineage_r_exists
            || pattern_state_exists
            || annotation_exists,
        pattern,
        annotations,
        pattern_desc_exists,
        lineage_exists,
        lineage_r_exists,
        pattern_state_exists,
        annotation_exists,
        is_pattern_view: !iframe_passback,
        panels,
    }
}

/// Renders the base template and wraps it in the pattern info container.
pub fn render_panels(model: &ViewModel, templates: &TemplateStore) -> Result<String, ViewerError> {
    let body = templates.render(BASE_TEMPLATE_ID, model)?;
    Ok(format!("<div class=\"pl-c-pattern-info\">{}</div>", body))
}

fn mark_commas(entries: &mut [LineageEntry]) {
    let last = entries.len().saturating_sub(1);
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.has_comma = i < last;
    }
}
