//! Matching the global annotation set against one pattern's markup.

use log::warn;
use patternlab_types::{Annotation, AnnotationComment};
use scraper::{Html, Selector};

/// The annotations whose selector matches at least one element of `markup`,
/// numbered from 1 in the order they appear in `comments`.
///
/// Selectors that do not parse are skipped.
pub fn match_annotations(markup: &str, comments: &[AnnotationComment]) -> Vec<Annotation> {
    if markup.trim().is_empty() || comments.is_empty() {
        return Vec::new();
    }
    let fragment = Html::parse_fragment(markup);

    comments
        .iter()
        .filter(|comment| match Selector::parse(&comment.el) {
            Ok(selector) => fragment.select(&selector).next().is_some(),
            Err(e) => {
                warn!("Skipping annotation with invalid selector '{}': {}", comment.el, e);
                false
            }
        })
        .enumerate()
        .map(|(i, comment)| Annotation {
            display_number: i + 1,
            el: comment.el.clone(),
            title: comment.title.clone(),
            comment: comment.comment.clone(),
        })
        .collect()
}
