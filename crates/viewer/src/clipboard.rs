//! Labels of the code panels' copy buttons.

use scraper::{Html, Selector};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied";
const COPY_BUTTON_SELECTOR: &str = ".pl-js-code-copy-btn";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyButtons {
    labels: Vec<String>,
}

impl CopyButtons {
    pub fn new(count: usize) -> Self {
        Self {
            labels: vec![COPY_LABEL.to_string(); count],
        }
    }

    /// One button per `.pl-js-code-copy-btn` in the rendered panels.
    pub fn from_html(html: &str) -> Self {
        let count = match Selector::parse(COPY_BUTTON_SELECTOR) {
            Ok(selector) => Html::parse_fragment(html).select(&selector).count(),
            Err(_) => 0,
        };
        Self::new(count)
    }

    /// A copy through button `index` succeeded: that button reads "Copied",
    /// every other one goes back to "Copy".
    pub fn copied(&mut self, index: usize) {
        for (i, label) in self.labels.iter_mut().enumerate() {
            let text = if i == index { COPIED_LABEL } else { COPY_LABEL };
            *label = text.to_string();
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copied_relabels() {
        let mut buttons = CopyButtons::new(3);
        buttons.copied(1);
        assert_eq!(buttons.labels(), ["Copy", "Copied", "Copy"]);
        buttons.copied(2);
        assert_eq!(buttons.labels(), ["Copy", "Copy", "Copied"]);
    }

    #[test]
    fn test_from_html_counts_buttons() {
        let html = r#"<button class="pl-js-code-copy-btn">Copy</button><p></p><button class="x pl-js-code-copy-btn">Copy</button>"#;
        assert_eq!(CopyButtons::from_html(html).labels().len(), 2);
    }
}
