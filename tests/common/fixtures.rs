use patternlab::{BuildState, LineageEntry, PatternData};
use serde_json::{Value, json};

pub fn config() -> Value {
    json!({
        "cacheBust": true,
        "paths": {
            "source": { "annotations": "source/_annotations/" },
            "public": {
                "data": "styleguide/data/",
                "annotations": "annotations/",
                "patterns": "patterns/"
            }
        },
        "ishControlsHide": { "s": false, "hay": true },
        "outputFileSuffixes": {
            "rendered": ".rendered",
            "rawTemplate": "",
            "markupOnly": ".markup-only"
        },
        "uikits": [
            { "name": "uikit-workshop", "outputDir": "public", "enabled": true },
            { "name": "uikit-polyfills", "outputDir": "public-polyfills", "enabled": true },
            { "name": "uikit-disabled", "outputDir": "public-disabled", "enabled": false }
        ]
    })
}

pub fn build_state_json(config: Value) -> Value {
    json!({
        "config": config,
        "patternTypes": [
            { "patternTypeLC": "atoms", "patternTypeUC": "Atoms", "patternItems": [] }
        ],
        "patternPaths": {
            "atoms": {
                "logo": "00-atoms/00-global/00-logo",
                "image": "00-atoms/01-media/00-image"
            },
            "molecules": { "media-block": "01-molecules/00-media-block" }
        },
        "viewAllPaths": {
            "atoms": { "all": "00-atoms" }
        },
        "plugins": [{ "name": "plugin-tab" }]
    })
}

pub fn build_state() -> BuildState {
    serde_json::from_value(build_state_json(config())).expect("fixture build state")
}

pub const LOGO_DIR: &str = "patterns/00-atoms-00-global-00-logo";
pub const LOGO_BASE: &str = "patterns/00-atoms-00-global-00-logo/00-atoms-00-global-00-logo";
pub const LOGO_TEMPLATE: &str = "<img class=\"logo\" src=\"{{ logo.src }}\" alt=\"{{ logo.alt }}\">";
pub const LOGO_MARKUP: &str = "<img class=\"logo\" src=\"../../images/logo.png\" alt=\"Logo\">";

pub fn logo_pattern() -> PatternData {
    let mut data = PatternData::new("atoms-logo", "logo", "mustache");
    data.pattern_desc = "<p>The brand mark.</p>".into();
    data.pattern_markup = LOGO_MARKUP.into();
    data.pattern_state = "complete".into();
    data.lineage_r = vec![
        LineageEntry::new("molecules-media-block", "../01-molecules-00-media-block/01-molecules-00-media-block.rendered.html"),
        LineageEntry::new("atoms-image", "../00-atoms-01-media-00-image/00-atoms-01-media-00-image.rendered.html"),
    ];
    data
}

pub const ANNOTATIONS_JS: &str = r##"var comments = {
  "comments": [
    { "el": ".logo", "title": "Logo", "comment": "The logo links home." },
    { "el": "#nav", "title": "Navigation", "comment": "Primary navigation." }
  ]
};"##;

pub const ANNOTATIONS_MD: &str = "---\nel: \"img\"\ntitle: \"Images\"\n---\nImages need **alt** text.\n~*~\n---\nselector: \".logo\"\ntitle: \"Ignored\"\n---\nDuplicate of a script annotation.\n";
