//! Maps pattern partials to the files the build wrote for them.

use patternlab_types::BuildState;
use serde_json::{Map, Value};

const BASE_DIR: &str = "patterns";
const VIEW_ALL_PREFIX: &str = "viewall-";

/// Resolves pattern partials against the exported `patternPaths` and
/// `viewAllPaths` maps (`{ "<type>": { "<pattern>": "<path>" } }`).
#[derive(Debug, Clone, Default)]
pub struct UrlHandler {
    pattern_paths: Map<String, Value>,
    view_all_paths: Map<String, Value>,
    rendered_suffix: String,
}

impl UrlHandler {
    pub fn new(pattern_paths: &Value, view_all_paths: &Value, rendered_suffix: impl Into<String>) -> Self {
        Self {
            pattern_paths: pattern_paths.as_object().cloned().unwrap_or_default(),
            view_all_paths: view_all_paths.as_object().cloned().unwrap_or_default(),
            rendered_suffix: rendered_suffix.into(),
        }
    }

    pub fn from_build_state(state: &BuildState) -> Self {
        Self::new(
            &state.pattern_paths,
            &state.view_all_paths,
            state.config.output_file_suffixes().rendered,
        )
    }

    /// The file for a pattern partial, relative to the public dir.
    ///
    /// `all` and `snapshots` map to the style guide pages. With
    /// `with_rendered_suffix` unset the result is the extension-less file base
    /// that panel fetches append their own suffix to. Unknown partials yield
    /// an empty string.
    pub fn get_file_name(&self, name: &str, with_rendered_suffix: bool) -> String {
        match name {
            "all" => return "styleguide/html/styleguide.html".to_string(),
            "snapshots" => return "snapshots/index.html".to_string(),
            _ => {}
        }

        let is_view_all = name.starts_with(VIEW_ALL_PREFIX);
        let paths = if is_view_all {
            &self.view_all_paths
        } else {
            &self.pattern_paths
        };
        let clean = name.replacen(VIEW_ALL_PREFIX, "", 1);

        let (pattern_type, pattern) = pattern_info(&clean, paths);
        let Some(group) = paths.get(&pattern_type).and_then(Value::as_object) else {
            return String::new();
        };

        let file = group
            .get(&pattern)
            .or_else(|| {
                group
                    .iter()
                    .find(|(key, _)| key.contains(pattern.as_str()))
                    .map(|(_, value)| value)
            })
            .and_then(Value::as_str)
            .unwrap_or_default();
        if file.is_empty() {
            return String::new();
        }

        let flattened = file.replace('/', "-");
        if is_view_all {
            format!("{}/{}/index.html", BASE_DIR, flattened)
        } else if with_rendered_suffix {
            format!("{0}/{1}/{1}{2}.html", BASE_DIR, flattened, self.rendered_suffix)
        } else {
            format!("{0}/{1}/{1}", BASE_DIR, flattened)
        }
    }
}

/// Splits a partial into its pattern type and the pattern key within it.
///
/// The type grows one dash-separated segment at a time until it names a known
/// group, so multi-word types like `page-templates` resolve.
fn pattern_info(name: &str, paths: &Map<String, Value>) -> (String, String) {
    let mut bits = name.split('-');
    let mut pattern_type = bits.next().unwrap_or_default().to_string();
    for bit in bits {
        if paths.contains_key(&pattern_type) {
            break;
        }
        pattern_type.push('-');
        pattern_type.push_str(bit);
    }
    let pattern = name.get(pattern_type.len() + 1..).unwrap_or_default().to_string();
    (pattern_type, pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handler() -> UrlHandler {
        UrlHandler::new(
            &json!({
                "atoms": {
                    "logo": "00-atoms/01-global/00-logo",
                    "button-primary": "00-atoms/02-buttons/00-button-primary"
                },
                "page-templates": { "home": "03-templates/00-home" }
            }),
            &json!({
                "atoms": { "all": "00-atoms", "global": "00-atoms-01-global" }
            }),
            ".rendered",
        )
    }

    #[test]
    fn test_special_names() {
        let urls = handler();
        assert_eq!(urls.get_file_name("all", true), "styleguide/html/styleguide.html");
        assert_eq!(urls.get_file_name("snapshots", true), "snapshots/index.html");
    }

    #[test]
    fn test_rendered_pattern_file() {
        assert_eq!(
            handler().get_file_name("atoms-logo", true),
            "patterns/00-atoms-01-global-00-logo/00-atoms-01-global-00-logo.rendered.html"
        );
    }

    #[test]
    fn test_file_base_without_suffix() {
        assert_eq!(
            handler().get_file_name("atoms-logo", false),
            "patterns/00-atoms-01-global-00-logo/00-atoms-01-global-00-logo"
        );
    }

    #[test]
    fn test_multi_segment_pattern_type() {
        assert_eq!(
            handler().get_file_name("page-templates-home", false),
            "patterns/03-templates-00-home/03-templates-00-home"
        );
    }

    #[test]
    fn test_partial_key_match() {
        assert_eq!(
            handler().get_file_name("atoms-button", false),
            "patterns/00-atoms-02-buttons-00-button-primary/00-atoms-02-buttons-00-button-primary"
        );
    }

    #[test]
    fn test_view_all() {
        assert_eq!(
            handler().get_file_name("viewall-atoms-global", true),
            "patterns/00-atoms-01-global/index.html"
        );
    }

    #[test]
    fn test_unknown_pattern_is_empty() {
        let urls = handler();
        assert_eq!(urls.get_file_name("organisms-header", true), "");
        assert_eq!(urls.get_file_name("atoms-zzz", true), "");
    }

    #[test]
    fn test_custom_rendered_suffix() {
        let urls = UrlHandler::new(&json!({ "atoms": { "logo": "atoms/logo" } }), &json!({}), "");
        assert_eq!(urls.get_file_name("atoms-logo", true), "patterns/atoms-logo/atoms-logo.html");
    }
}
