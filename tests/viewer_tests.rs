mod common;

use common::fixtures::{ANNOTATIONS_JS, LOGO_BASE, LOGO_MARKUP, LOGO_TEMPLATE, build_state, logo_pattern};
use common::{BuildDir, TestResult, init_logging};
use patternlab::{
    FrameMessage, PanelEvent, PanelPlugin, RecordingFrameHost, RenderedPanels, TargetOrigin,
    ViewRequest, ViewerError,
};
use std::sync::Arc;
use std::time::Duration;

/// A build with exported data and the logo pattern's files in `public/`.
fn logo_build() -> Result<BuildDir, Box<dyn std::error::Error>> {
    let build = BuildDir::new(build_state())?;
    build.write("source/_annotations/annotations.js", ANNOTATIONS_JS)?;
    build.export()?;
    build.write(&format!("public/{}.mustache", LOGO_BASE), LOGO_TEMPLATE)?;
    build.write(&format!("public/{}.markup-only.html", LOGO_BASE), LOGO_MARKUP)?;
    Ok(build)
}

#[derive(Debug)]
struct TabCounter;

impl PanelPlugin for TabCounter {
    fn name(&self) -> &str {
        "tab-counter"
    }

    fn insert_panels(&self, panels: &mut RenderedPanels) -> Result<(), ViewerError> {
        let tabs = panels.html.matches("pl-js-tab-link").count();
        panels.html.push_str(&format!("<!-- {} tabs -->", tabs));
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pattern_page_end_to_end() -> TestResult {
    init_logging();
    let build = logo_build()?;
    let frame = Arc::new(RecordingFrameHost::new());
    let (tx, rx) = async_channel::unbounded();
    let viewer = build
        .viewer("public")?
        .with_frame_host(frame.clone())
        .with_events(tx)
        .with_plugin(Arc::new(TabCounter))
        .with_target_origin(TargetOrigin::for_page("http:", "localhost:3000"))
        .build()?;

    let rendered = viewer.show(ViewRequest::new(logo_pattern())).await?;
    let html = &rendered.html;

    assert!(html.contains("title=\"logo\">LOGO</h2>"));
    assert!(html.contains("pl-c-pattern-state--complete"));
    assert!(html.contains("<p>The brand mark.</p>"));
    assert!(html.contains("molecules-media-block</a>, "));
    assert!(html.contains(">mustache</a>"));
    assert!(html.contains(">HTML</a>"));
    assert!(html.contains("{{ logo.src }}"));
    assert!(html.contains("<span class=\"token punctuation\">&lt;</span>img</span>"));
    assert!(html.contains(
        "id=\"pl-atoms-logo-pl-panel-pattern-tab\" class=\"pl-c-tabs__link pl-js-tab-link pl-is-active-tab\""
    ));
    assert_eq!(html.matches("pl-is-active-tab").count(), 2);
    assert!(html.ends_with("<!-- 2 tabs -->"));

    assert_eq!(rendered.annotations.len(), 1);
    assert_eq!(rendered.annotations[0].el, ".logo");
    assert_eq!(rendered.annotations[0].display_number, 1);

    let links: Vec<&str> = rendered.lineage_links.iter().map(|l| l.partial.as_str()).collect();
    assert_eq!(links, vec!["molecules-media-block", "atoms-image"]);
    assert_eq!(
        rendered.lineage_links[0].path,
        "patterns/01-molecules-00-media-block/01-molecules-00-media-block.rendered.html"
    );

    let posted = frame.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].1.as_str(), "http://localhost:3000");
    assert!(matches!(
        frame.messages().as_slice(),
        [FrameMessage::AnnotationsHighlightShow { annotations }] if annotations.len() == 1
    ));

    let events: Vec<PanelEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    let completed = events
        .iter()
        .filter(|e| matches!(e, PanelEvent::Completed { .. }))
        .count();
    assert_eq!(completed, 2);
    assert!(matches!(events.last(), Some(PanelEvent::Rendered { .. })));
    Ok(())
}

#[tokio::test]
async fn test_lineage_navigation() -> TestResult {
    let build = logo_build()?;
    let frame = Arc::new(RecordingFrameHost::new());
    let viewer = build.viewer("public")?.with_frame_host(frame.clone()).build()?;

    let message = viewer.lineage_link_clicked("atoms-image")?;
    assert_eq!(
        message,
        FrameMessage::UpdatePath {
            path: "patterns/00-atoms-01-media-00-image/00-atoms-01-media-00-image.rendered.html".into()
        }
    );
    assert_eq!(frame.posted()[0].1.as_str(), "*");
    Ok(())
}

#[tokio::test]
async fn test_modal_view_uses_plain_name() -> TestResult {
    let build = logo_build()?;
    let viewer = build.viewer("public")?.build()?;
    let rendered = viewer
        .show(ViewRequest::new(logo_pattern()).with_iframe_passback(true))
        .await?;
    assert!(rendered.html.contains("title=\"logo\">logo</h2>"));
    assert!(rendered.iframe_passback);
    Ok(())
}

#[tokio::test]
async fn test_missing_pattern_file_fails_instead_of_hanging() -> TestResult {
    let build = BuildDir::new(build_state())?;
    build.export()?;
    build.write(&format!("public/{}.mustache", LOGO_BASE), LOGO_TEMPLATE)?;
    let viewer = build
        .viewer("public")?
        .with_fetch_timeout(Duration::from_secs(2))
        .build()?;

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        viewer.show(ViewRequest::new(logo_pattern())),
    )
    .await?;
    let Err(ViewerError::PanelsFailed { failures }) = result else {
        return Err("expected PanelsFailed".into());
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].panel.as_str(), "pl-panel-html");
    Ok(())
}

#[tokio::test]
async fn test_unknown_pattern_is_reported() -> TestResult {
    let build = logo_build()?;
    let viewer = build.viewer("public")?.build()?;
    let mut pattern = logo_pattern();
    pattern.pattern_partial = "organisms-header".into();

    let result = viewer.show(ViewRequest::new(pattern)).await;
    assert!(matches!(result, Err(ViewerError::UnknownPattern(p)) if p == "organisms-header"));
    Ok(())
}
