//! Annotation gathering from the source annotations directory.
//!
//! Two formats live side by side in `paths.source.annotations`:
//!
//! - `annotations.js`: `var comments = { "comments": [ ... ] };` (JSON inside
//!   a script assignment)
//! - `*.md`: blocks separated by `~*~`, each with YAML front matter naming the
//!   selector (`el` or `selector`) and `title`, followed by Markdown that
//!   becomes the comment HTML.
//!
//! Script comments win over Markdown ones for the same selector.

use itertools::Itertools;
use log::{debug, error, warn};
use patternlab_traits::{AnnotationError, AnnotationSource};
use patternlab_types::{AnnotationComment, CommentsPayload};
use pulldown_cmark::{Parser, html};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const SCRIPT_FILE: &str = "annotations.js";
const BLOCK_DELIMITER: &str = "~*~";

#[derive(Debug, Clone)]
pub struct FilesystemAnnotationSource {
    dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    el: Option<String>,
    selector: Option<String>,
    title: Option<String>,
}

impl FilesystemAnnotationSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn gather_script(&self) -> Vec<AnnotationComment> {
        let path = self.dir.join(SCRIPT_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => {
                debug!(
                    "{} missing from {}. Expected when annotations are Markdown only.",
                    SCRIPT_FILE,
                    self.dir.display()
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<CommentsPayload>(unwrap_script(&text)) {
            Ok(payload) => payload.comments,
            Err(e) => {
                error!("There was an error parsing JSON for {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    fn gather_markdown(&self) -> Result<Vec<AnnotationComment>, AnnotationError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AnnotationError::Read {
                    path: self.dir.display().to_string(),
                    source,
                });
            }
        };

        let files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .sorted()
            .collect();

        let mut comments = Vec::new();
        for file in files {
            let text = fs::read_to_string(&file).map_err(|source| AnnotationError::Read {
                path: file.display().to_string(),
                source,
            })?;
            for block in text.split(BLOCK_DELIMITER) {
                match parse_markdown_block(block) {
                    Ok(Some(comment)) => comments.push(comment),
                    Ok(None) => {}
                    Err(message) => warn!("Skipping annotation in {}: {}", file.display(), message),
                }
            }
        }
        Ok(comments)
    }
}

impl AnnotationSource for FilesystemAnnotationSource {
    fn gather(&self) -> Result<Vec<AnnotationComment>, AnnotationError> {
        let script = self.gather_script();
        let markdown = self.gather_markdown()?;
        Ok(script
            .into_iter()
            .chain(markdown)
            .unique_by(|comment| comment.el.clone())
            .collect())
    }

    fn name(&self) -> &'static str {
        "FilesystemAnnotationSource"
    }
}

/// Strips the `var comments =` assignment and trailing semicolon around the
/// JSON payload.
fn unwrap_script(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("var comments")
        .map(|rest| rest.trim_start().trim_start_matches('=').trim_start())
        .unwrap_or(trimmed);
    body.trim_end().trim_end_matches(';').trim_end()
}

/// Parses one `~*~` block. Blank blocks yield `Ok(None)`; a block naming no
/// selector is an error.
fn parse_markdown_block(block: &str) -> Result<Option<AnnotationComment>, String> {
    if block.trim().is_empty() {
        return Ok(None);
    }

    let (front, body) = split_front_matter(block);
    let meta = match front {
        Some(yaml) if !yaml.trim().is_empty() => {
            serde_yaml::from_str::<FrontMatter>(yaml).map_err(|e| e.to_string())?
        }
        _ => FrontMatter::default(),
    };

    let Some(el) = meta.el.or(meta.selector) else {
        return Err("front matter names no `el` or `selector`".to_string());
    };

    let mut comment = String::new();
    html::push_html(&mut comment, Parser::new(body));

    Ok(Some(AnnotationComment {
        el,
        title: meta.title.unwrap_or_default(),
        comment,
    }))
}

/// Splits `---\n<yaml>---\n<markdown>`; blocks without front matter are all
/// Markdown.
fn split_front_matter(block: &str) -> (Option<&str>, &str) {
    let start = block.trim_start_matches(['\r', '\n', ' ', '\t']);
    let Some(after_open) = start
        .strip_prefix("---\n")
        .or_else(|| start.strip_prefix("---\r\n"))
    else {
        return (None, block);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, block)
}
