use crate::apply::apply;
use crate::barrier::{PanelContext, PanelEvent, collect_panels, notify};
use crate::error::ViewerError;
use crate::gather::{gather_panels, plan_jobs};
use crate::highlight::{Highlighter, MarkupHighlighter};
use crate::messages::{FrameMessage, TargetOrigin};
use crate::plugin::{FrameHost, PanelPlugin};
use crate::registry::PanelRegistry;
use crate::templates::TemplateStore;
use crate::url::UrlHandler;
use crate::view::{RenderedPanels, render_panels, render_view};
use log::{debug, trace};
use patternlab_traits::PatternSource;
use patternlab_types::{AnnotationComment, OutputFileSuffixes, PatternData};
use std::sync::Arc;
use std::time::Duration;

/// Default time a single panel may take to produce its content.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub fetch_timeout: Duration,
    pub target_origin: TargetOrigin,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            target_origin: TargetOrigin::Any,
        }
    }
}

/// One request to show the info panels of a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRequest {
    pub pattern: PatternData,
    /// Set when the panels are shown in the style guide modal rather than on
    /// the pattern's own page.
    pub iframe_passback: bool,
    pub switch_text: bool,
}

impl ViewRequest {
    pub fn new(pattern: PatternData) -> Self {
        Self {
            pattern,
            iframe_passback: false,
            switch_text: false,
        }
    }

    pub fn with_iframe_passback(mut self, iframe_passback: bool) -> Self {
        self.iframe_passback = iframe_passback;
        self
    }

    pub fn with_switch_text(mut self, switch_text: bool) -> Self {
        self.switch_text = switch_text;
        self
    }
}

/// Builds the info panels for patterns.
///
/// A viewer is immutable once built and may serve any number of overlapping
/// [`show`](Self::show) calls; each call works on its own panel snapshot.
#[derive(Debug)]
pub struct PanelsViewer {
    registry: PanelRegistry,
    templates: Arc<TemplateStore>,
    source: Arc<dyn PatternSource>,
    highlighter: Arc<dyn Highlighter>,
    urls: UrlHandler,
    comments: Vec<AnnotationComment>,
    plugins: Vec<Arc<dyn PanelPlugin>>,
    frame: Option<Arc<dyn FrameHost>>,
    events: Option<async_channel::Sender<PanelEvent>>,
    options: ViewerOptions,
}

impl PanelsViewer {
    pub fn builder() -> PanelsViewerBuilder {
        PanelsViewerBuilder::new()
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Gathers, produces and renders every panel for the requested pattern,
    /// posts the resulting frame messages and hands the output to plugins.
    pub async fn show(&self, request: ViewRequest) -> Result<RenderedPanels, ViewerError> {
        let ViewRequest {
            pattern,
            iframe_passback,
            switch_text,
        } = request;
        let partial = pattern.pattern_partial.clone();
        debug!("[{}] Showing panels (passback: {})", partial, iframe_passback);

        let panels = gather_panels(self.registry.get(), &pattern);
        let timestamp = chrono::Utc::now().timestamp_millis();
        let jobs = plan_jobs(panels, &pattern, &self.urls, timestamp)?;

        let ctx = PanelContext {
            partial: partial.clone(),
            source: Arc::clone(&self.source),
            templates: Arc::clone(&self.templates),
            highlighter: Arc::clone(&self.highlighter),
            pattern_data: Arc::new(serde_json::to_value(&pattern)?),
            timeout: self.options.fetch_timeout,
            events: self.events.clone(),
        };
        let collected = collect_panels(jobs, ctx).await?;

        let model = render_view(pattern, collected, &self.comments, iframe_passback);
        let html = render_panels(&model, &self.templates)?;
        self.emit(PanelEvent::Rendered {
            partial: partial.clone(),
        });

        let applied = apply(&html, partial.as_str(), &model.panels, &self.urls);
        let messages = model.frame_messages();
        for message in &messages {
            self.post(message)?;
        }

        let mut rendered = RenderedPanels {
            partial,
            html: applied.html,
            annotations: model.annotations,
            lineage_links: applied.lineage_links,
            messages,
            iframe_passback,
            switch_text,
        };
        for plugin in &self.plugins {
            trace!("[{}] Inserting panels from plugin '{}'", rendered.partial, plugin.name());
            plugin.insert_panels(&mut rendered)?;
        }
        debug!("[{}] Panels ready", rendered.partial);
        Ok(rendered)
    }

    /// A lineage link was followed: ask the pattern iframe to navigate to the
    /// linked pattern's rendered page.
    pub fn lineage_link_clicked(&self, partial: &str) -> Result<FrameMessage, ViewerError> {
        let message = FrameMessage::UpdatePath {
            path: self.urls.get_file_name(partial, true),
        };
        self.post(&message)?;
        Ok(message)
    }

    fn post(&self, message: &FrameMessage) -> Result<(), ViewerError> {
        if let Some(frame) = &self.frame {
            frame.post_message(&message.to_json()?, &self.options.target_origin);
        }
        Ok(())
    }

    fn emit(&self, event: PanelEvent) {
        if let Some(events) = &self.events {
            notify(events, event);
        }
    }
}

/// A builder for creating a [`PanelsViewer`].
#[derive(Debug, Default)]
pub struct PanelsViewerBuilder {
    registry: Option<PanelRegistry>,
    templates: Option<TemplateStore>,
    source: Option<Arc<dyn PatternSource>>,
    highlighter: Option<Arc<dyn Highlighter>>,
    urls: UrlHandler,
    suffixes: OutputFileSuffixes,
    comments: Vec<AnnotationComment>,
    plugins: Vec<Arc<dyn PanelPlugin>>,
    frame: Option<Arc<dyn FrameHost>>,
    events: Option<async_channel::Sender<PanelEvent>>,
    options: ViewerOptions,
}

impl PanelsViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where pattern files are fetched from. Required.
    pub fn with_source(mut self, source: Arc<dyn PatternSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_url_handler(mut self, urls: UrlHandler) -> Self {
        self.urls = urls;
        self
    }

    /// File suffixes used by the default panels.
    pub fn with_output_file_suffixes(mut self, suffixes: OutputFileSuffixes) -> Self {
        self.suffixes = suffixes;
        self
    }

    /// Replaces the default panels.
    pub fn with_registry(mut self, registry: PanelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the built-in templates.
    pub fn with_templates(mut self, templates: TemplateStore) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    /// The global annotations matched against every pattern.
    pub fn with_comments(mut self, comments: Vec<AnnotationComment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn PanelPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn with_frame_host(mut self, frame: Arc<dyn FrameHost>) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Progress events of every request are sent here. Sending never waits:
    /// events that do not fit a bounded channel are dropped.
    pub fn with_events(mut self, events: async_channel::Sender<PanelEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.options.fetch_timeout = timeout;
        self
    }

    pub fn with_target_origin(mut self, origin: TargetOrigin) -> Self {
        self.options.target_origin = origin;
        self
    }

    pub fn build(self) -> Result<PanelsViewer, ViewerError> {
        let source = self.source.ok_or_else(|| {
            ViewerError::Config("No pattern source has been configured. Use `with_source`.".to_string())
        })?;
        let templates = match self.templates {
            Some(templates) => templates,
            None => TemplateStore::with_builtin()?,
        };
        let registry = self
            .registry
            .unwrap_or_else(|| PanelRegistry::with_defaults(&self.suffixes));
        debug!(
            "Building panels viewer over '{}' with {} panel(s) and {} plugin(s)",
            source.name(),
            registry.count(),
            self.plugins.len()
        );

        Ok(PanelsViewer {
            registry,
            templates: Arc::new(templates),
            source,
            highlighter: self.highlighter.unwrap_or_else(|| Arc::new(MarkupHighlighter)),
            urls: self.urls,
            comments: self.comments,
            plugins: self.plugins,
            frame: self.frame,
            events: self.events,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::RecordingFrameHost;
    use crate::registry::CODE_TEMPLATE_ID;
    use patternlab_traits::{InMemoryPatternSource, SharedSourceData, SourceError, strip_query};
    use patternlab_types::{LineageEntry, Panel};
    use serde_json::json;
    use std::collections::HashMap;

    const BASE: &str = "patterns/00-atoms-00-logo/00-atoms-00-logo";

    fn source() -> Arc<InMemoryPatternSource> {
        Arc::new(
            InMemoryPatternSource::new()
                .with_file(format!("{}.mustache", BASE), "<img class=\"logo\" src=\"{{ src }}\">")
                .with_file(format!("{}.markup-only.html", BASE), "<img class=\"logo\" src=\"logo.png\">"),
        )
    }

    fn urls() -> UrlHandler {
        UrlHandler::new(
            &json!({ "atoms": { "logo": "00-atoms/00-logo", "image": "00-atoms/01-image" } }),
            &json!({}),
            ".rendered",
        )
    }

    fn pattern() -> PatternData {
        let mut data = PatternData::new("atoms-logo", "Logo", "mustache");
        data.pattern_markup = "<img class=\"logo\" src=\"logo.png\">".into();
        data.lineage = vec![LineageEntry::new("atoms-image", "../x.html")];
        data
    }

    /// Delays loads by file suffix on top of the in-memory files.
    #[derive(Debug)]
    struct SlowSource {
        inner: Arc<InMemoryPatternSource>,
        delays: HashMap<&'static str, u64>,
    }

    impl PatternSource for SlowSource {
        fn load(&self, request_path: &str) -> Result<SharedSourceData, SourceError> {
            let path = strip_query(request_path);
            if let Some((_, ms)) = self.delays.iter().find(|(suffix, _)| path.ends_with(*suffix)) {
                std::thread::sleep(Duration::from_millis(*ms));
            }
            self.inner.load(path)
        }

        fn exists(&self, request_path: &str) -> bool {
            self.inner.exists(request_path)
        }

        fn name(&self) -> &'static str {
            "Slow"
        }
    }

    /// The two default panels plus a third fetched one, each delayed.
    fn three_panel_viewer(
        delays: [u64; 3],
        events: async_channel::Sender<PanelEvent>,
    ) -> PanelsViewer {
        let inner = source();
        inner
            .add(format!("{}.json", BASE), "{\"src\": \"logo.png\"}")
            .unwrap();
        let source = SlowSource {
            inner,
            delays: HashMap::from([
                (".mustache", delays[0]),
                (".markup-only.html", delays[1]),
                (".json", delays[2]),
            ]),
        };
        let mut registry = PanelRegistry::with_defaults(&OutputFileSuffixes::default());
        registry.add(
            Panel::new("pl-panel-json")
                .with_name("JSON")
                .with_template(CODE_TEMPLATE_ID)
                .with_http_request(".json"),
        );
        PanelsViewer::builder()
            .with_source(Arc::new(source))
            .with_url_handler(urls())
            .with_registry(registry)
            .with_events(events)
            .build()
            .unwrap()
    }

    #[derive(Debug)]
    struct Footer;

    impl PanelPlugin for Footer {
        fn name(&self) -> &str {
            "footer"
        }

        fn insert_panels(&self, panels: &mut RenderedPanels) -> Result<(), ViewerError> {
            panels.html.push_str("<footer>plugin</footer>");
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_show_renders_default_panels() {
        let _ = env_logger::builder().is_test(true).try_init();
        let frame = Arc::new(RecordingFrameHost::new());
        let viewer = PanelsViewer::builder()
            .with_source(source())
            .with_url_handler(urls())
            .with_comments(vec![AnnotationComment::new(".logo", "Logo", "The logo")])
            .with_frame_host(frame.clone())
            .with_plugin(Arc::new(Footer))
            .build()
            .unwrap();

        let rendered = viewer.show(ViewRequest::new(pattern())).await.unwrap();

        assert!(rendered.html.starts_with("<div class=\"pl-c-pattern-info\">"));
        assert!(rendered.html.contains("id=\"pl-atoms-logo-pl-panel-pattern-tab\""));
        assert!(rendered.html.contains(">mustache</a>"));
        assert!(rendered.html.contains(">HTML</a>"));
        assert!(rendered.html.contains("pl-is-active-tab"));
        assert!(rendered.html.contains("token attr-name"));
        assert!(rendered.html.ends_with("<footer>plugin</footer>"));

        assert_eq!(rendered.annotations.len(), 1);
        assert_eq!(rendered.lineage_links.len(), 1);
        assert_eq!(
            rendered.lineage_links[0].path,
            "patterns/00-atoms-01-image/00-atoms-01-image.rendered.html"
        );
        assert!(matches!(
            frame.messages().as_slice(),
            [FrameMessage::AnnotationsHighlightShow { .. }]
        ));
    }

    #[tokio::test]
    async fn test_failed_fetch_surfaces_error() {
        let viewer = PanelsViewer::builder()
            .with_source(Arc::new(InMemoryPatternSource::new()))
            .with_url_handler(urls())
            .build()
            .unwrap();

        let err = viewer.show(ViewRequest::new(pattern())).await.unwrap_err();
        let ViewerError::PanelsFailed { failures } = err else {
            panic!("expected PanelsFailed");
        };
        assert_eq!(failures.len(), 2);
    }

    #[tokio::test]
    async fn test_panel_without_template_does_not_stall() {
        let mut registry = PanelRegistry::with_defaults(&OutputFileSuffixes::default());
        registry.add(Panel::new("pl-panel-notes").with_name("Notes"));
        let (tx, rx) = async_channel::unbounded();
        let viewer = PanelsViewer::builder()
            .with_source(source())
            .with_url_handler(urls())
            .with_registry(registry)
            .with_events(tx)
            .build()
            .unwrap();

        let rendered = tokio::time::timeout(Duration::from_secs(5), viewer.show(ViewRequest::new(pattern())))
            .await
            .expect("show stalled")
            .unwrap();
        assert!(!rendered.html.contains("Notes"));

        let events: Vec<PanelEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        let rendered_events = events
            .iter()
            .filter(|e| matches!(e, PanelEvent::Rendered { .. }))
            .count();
        assert_eq!(rendered_events, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            PanelEvent::Completed { collected: 2, expected: 2, .. }
        )));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_render_fires_once_after_third_panel() {
        let orders = [
            ([150, 80, 10], ["pl-panel-json", "pl-panel-html", "pl-panel-pattern"]),
            ([80, 150, 10], ["pl-panel-json", "pl-panel-pattern", "pl-panel-html"]),
            ([10, 150, 80], ["pl-panel-pattern", "pl-panel-json", "pl-panel-html"]),
        ];
        for (delays, finish_order) in orders {
            let (tx, rx) = async_channel::unbounded();
            let viewer = three_panel_viewer(delays, tx);
            let rendered = viewer.show(ViewRequest::new(pattern())).await.unwrap();

            let events: Vec<PanelEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
            assert_eq!(events.len(), 4, "delays {:?}", delays);
            let completed: Vec<(&str, usize)> = events[..3]
                .iter()
                .map(|e| match e {
                    PanelEvent::Completed { panel, collected, expected: 3, .. } => {
                        (panel.as_str(), *collected)
                    }
                    other => panic!("unexpected event {:?}", other),
                })
                .collect();
            assert_eq!(
                completed,
                vec![(finish_order[0], 1), (finish_order[1], 2), (finish_order[2], 3)],
                "delays {:?}",
                delays
            );
            assert!(matches!(events[3], PanelEvent::Rendered { .. }));

            let pattern_tab = rendered.html.find(">mustache</a>").unwrap();
            let html_tab = rendered.html.find(">HTML</a>").unwrap();
            let json_tab = rendered.html.find(">JSON</a>").unwrap();
            assert!(pattern_tab < html_tab && html_tab < json_tab);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unread_bounded_events_do_not_block_show() {
        let (tx, rx) = async_channel::bounded(1);
        let viewer = three_panel_viewer([0, 10, 20], tx);

        let rendered = tokio::time::timeout(Duration::from_secs(5), viewer.show(ViewRequest::new(pattern())))
            .await
            .expect("show blocked on the event channel")
            .unwrap();
        assert!(rendered.html.contains(">JSON</a>"));
        assert_eq!(rx.len(), 1);
    }

    #[tokio::test]
    async fn test_vanilla_panel_and_modal_view() {
        let mut registry = PanelRegistry::new();
        registry.add(Panel::new("pl-panel-info").with_name("Info").with_template("info").as_default());
        let mut templates = TemplateStore::with_builtin().unwrap();
        templates.register("info", "<p>{{patternName}} in {{patternExtension}}</p>").unwrap();

        let viewer = PanelsViewer::builder()
            .with_source(source())
            .with_url_handler(urls())
            .with_registry(registry)
            .with_templates(templates)
            .build()
            .unwrap();

        let rendered = viewer
            .show(ViewRequest::new(pattern()).with_iframe_passback(true).with_switch_text(true))
            .await
            .unwrap();
        assert!(rendered.html.contains("<p>Logo in mustache</p>"));
        assert!(rendered.html.contains("title=\"Logo\">Logo</h2>"));
        assert!(rendered.iframe_passback);
        assert!(rendered.switch_text);
        assert!(rendered.html.contains("class=\"pl-c-tabs__link pl-js-tab-link pl-is-active-tab\""));
    }

    #[tokio::test]
    async fn test_lineage_link_posts_update_path() {
        let frame = Arc::new(RecordingFrameHost::new());
        let viewer = PanelsViewer::builder()
            .with_source(source())
            .with_url_handler(urls())
            .with_frame_host(frame.clone())
            .with_target_origin(TargetOrigin::for_page("http:", "localhost:3000"))
            .build()
            .unwrap();

        let message = viewer.lineage_link_clicked("atoms-image").unwrap();
        assert_eq!(
            message,
            FrameMessage::UpdatePath {
                path: "patterns/00-atoms-01-image/00-atoms-01-image.rendered.html".into()
            }
        );
        let posted = frame.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].1.as_str(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_overlapping_requests_are_independent() {
        let viewer = Arc::new(
            PanelsViewer::builder()
                .with_source(source())
                .with_url_handler(urls())
                .build()
                .unwrap(),
        );
        let mut other = pattern();
        other.pattern_name = "Other".into();

        let (a, b) = tokio::join!(
            viewer.show(ViewRequest::new(pattern())),
            viewer.show(ViewRequest::new(other))
        );
        assert!(a.unwrap().html.contains("LOGO"));
        assert!(b.unwrap().html.contains("OTHER"));
    }

    #[test]
    fn test_build_requires_source() {
        let err = PanelsViewer::builder().build().unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }
}
