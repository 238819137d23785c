//! Deterministic post-processing of the rendered panel markup.

use crate::url::UrlHandler;
use crate::view::LineageLink;
use log::trace;
use patternlab_types::CollectedPanel;
use scraper::{Html, Selector};
use std::collections::HashSet;

pub const ACTIVE_TAB_CLASS: &str = "pl-is-active-tab";
const LINEAGE_LINK_SELECTOR: &str = ".pl-js-lineage-link";

/// Rendered markup after the application step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub html: String,
    pub lineage_links: Vec<LineageLink>,
}

/// Activates the default tabs and collects the lineage links.
pub fn apply(html: &str, partial: &str, panels: &[CollectedPanel], urls: &UrlHandler) -> Applied {
    let html = activate_default_tabs(html, partial, panels);
    let lineage_links = lineage_links(&html, urls);
    Applied { html, lineage_links }
}

/// Marks the tab and panel block of every default panel as active. Panels
/// whose tab is not in the markup are left alone.
pub fn activate_default_tabs(html: &str, partial: &str, panels: &[CollectedPanel]) -> String {
    let ids = element_ids(html);
    let mut html = html.to_string();

    for collected in panels.iter().filter(|c| c.panel.default) {
        let tab = format!("pl-{}-{}-tab", partial, collected.panel.id);
        let block = format!("pl-{}-{}-panel", partial, collected.panel.id);
        if !ids.contains(&tab) {
            trace!("No tab '{}' in rendered panels", tab);
            continue;
        }
        html = add_class(&html, &tab, ACTIVE_TAB_CLASS);
        if ids.contains(&block) {
            html = add_class(&html, &block, ACTIVE_TAB_CLASS);
        }
    }
    html
}

/// Every `.pl-js-lineage-link` with a `data-patternpartial`, resolved to the
/// rendered file it should navigate to.
pub fn lineage_links(html: &str, urls: &UrlHandler) -> Vec<LineageLink> {
    let Ok(selector) = Selector::parse(LINEAGE_LINK_SELECTOR) else {
        return Vec::new();
    };
    Html::parse_fragment(html)
        .select(&selector)
        .filter_map(|el| el.value().attr("data-patternpartial"))
        .map(|partial| LineageLink {
            partial: partial.to_string(),
            path: urls.get_file_name(partial, true),
        })
        .collect()
}

fn element_ids(html: &str) -> HashSet<String> {
    let Ok(selector) = Selector::parse("[id]") else {
        return HashSet::new();
    };
    Html::parse_fragment(html)
        .select(&selector)
        .filter_map(|el| el.value().id().map(str::to_string))
        .collect()
}

/// Adds `class` to the start tag carrying `id="element_id"`, creating the
/// class attribute if needed. Markup without such a tag is returned as is.
pub fn add_class(html: &str, element_id: &str, class: &str) -> String {
    let Some((start, end)) = find_start_tag(html, element_id) else {
        return html.to_string();
    };
    let tag = &html[start..end];

    let new_tag = match find_attr_value(tag, "class") {
        Some((value_start, value_end)) => {
            let value = &tag[value_start..value_end];
            if value.split_whitespace().any(|c| c == class) {
                return html.to_string();
            }
            let sep = if value.trim().is_empty() { "" } else { " " };
            format!("{}{}{}{}", &tag[..value_end], sep, class, &tag[value_end..])
        }
        None => {
            let close = if tag.ends_with("/>") { tag.len() - 2 } else { tag.len() - 1 };
            format!("{} class=\"{}\"{}", tag[..close].trim_end(), class, &tag[close..])
        }
    };

    let mut out = String::with_capacity(html.len() + class.len() + 9);
    out.push_str(&html[..start]);
    out.push_str(&new_tag);
    out.push_str(&html[end..]);
    out
}

/// Byte range of the start tag holding the given id attribute.
fn find_start_tag(html: &str, element_id: &str) -> Option<(usize, usize)> {
    let needles = [format!("id=\"{}\"", element_id), format!("id='{}'", element_id)];
    let pos = needles.iter().find_map(|needle| {
        html.match_indices(needle.as_str())
            .map(|(pos, _)| pos)
            .find(|&pos| pos > 0 && html.as_bytes()[pos - 1].is_ascii_whitespace())
    })?;
    let start = html[..pos].rfind('<')?;
    let end = pos + html[pos..].find('>')? + 1;
    Some((start, end))
}

/// Byte range of a quoted attribute's value inside a single tag.
fn find_attr_value(tag: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = tag.as_bytes();
    for quote in ['"', '\''] {
        let needle = format!("{}={}", name, quote);
        let found = tag
            .match_indices(needle.as_str())
            .map(|(pos, _)| pos)
            .find(|&pos| pos > 0 && bytes[pos - 1].is_ascii_whitespace());
        if let Some(pos) = found {
            let value_start = pos + needle.len();
            let value_end = value_start + tag[value_start..].find(quote)?;
            return Some((value_start, value_end));
        }
    }
    None
}
