use serde::{Deserialize, Serialize};

/// A globally registered annotation: a CSS selector plus the note to show
/// for markup matching it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationComment {
    pub el: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
}

impl AnnotationComment {
    pub fn new(el: impl Into<String>, title: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            el: el.into(),
            title: title.into(),
            comment: comment.into(),
        }
    }
}

/// An annotation matched against a specific pattern's markup, numbered in
/// the order it was encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub display_number: usize,
    pub el: String,
    pub title: String,
    pub comment: String,
}

/// The `{ "comments": [...] }` payload written to `annotations.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsPayload {
    pub comments: Vec<AnnotationComment>,
}
