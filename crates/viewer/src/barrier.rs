//! The panel barrier: every panel of a request is produced concurrently and
//! the request continues once all of them have settled.
//!
//! Each request owns its jobs, its counter and its results. Nothing here is
//! shared between requests, so an earlier request finishing late can never
//! complete a newer one.

use crate::error::{PanelFailure, ViewerError};
use crate::gather::{JobKind, PanelJob};
use crate::highlight::Highlighter;
use crate::templates::TemplateStore;
use log::{debug, warn};
use patternlab_traits::PatternSource;
use patternlab_types::{CollectedPanel, PanelId, PatternPartial};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task;

/// Progress notifications for one view request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A panel produced its content.
    Completed {
        partial: PatternPartial,
        panel: PanelId,
        collected: usize,
        expected: usize,
    },
    /// A panel settled without content.
    Failed {
        partial: PatternPartial,
        panel: PanelId,
        message: String,
        collected: usize,
        expected: usize,
    },
    /// The base template was rendered from the collected panels.
    Rendered { partial: PatternPartial },
}

/// Everything a panel branch needs, cheaply cloneable into each task.
#[derive(Debug, Clone)]
pub struct PanelContext {
    pub partial: PatternPartial,
    pub source: Arc<dyn PatternSource>,
    pub templates: Arc<TemplateStore>,
    pub highlighter: Arc<dyn Highlighter>,
    /// Pattern data handed to templates of panels that are not fetched.
    pub pattern_data: Arc<Value>,
    pub timeout: Duration,
    pub events: Option<async_channel::Sender<PanelEvent>>,
}

/// Runs every job and returns the collected panels in job order.
///
/// All branches settle before this returns. If any of them failed or timed
/// out, nothing is returned but the failures.
pub async fn collect_panels(
    jobs: Vec<PanelJob>,
    ctx: PanelContext,
) -> Result<Vec<CollectedPanel>, ViewerError> {
    let expected = jobs.len();
    let settled = Arc::new(AtomicUsize::new(0));
    debug!("[{}] Collecting {} panel(s)", ctx.partial, expected);

    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let ctx = ctx.clone();
            let settled = Arc::clone(&settled);
            let panel = job.panel.id.clone();
            let handle = task::spawn(async move {
                let index = job.index;
                let id = job.panel.id.clone();
                let result = match tokio::time::timeout(ctx.timeout, produce(job, &ctx)).await {
                    Ok(result) => result,
                    Err(_) => Err(ViewerError::PanelTimedOut {
                        panel: id.clone(),
                        after: ctx.timeout,
                    }),
                };

                let collected = settled.fetch_add(1, Ordering::SeqCst) + 1;
                let event = match &result {
                    Ok(_) => PanelEvent::Completed {
                        partial: ctx.partial.clone(),
                        panel: id,
                        collected,
                        expected,
                    },
                    Err(e) => PanelEvent::Failed {
                        partial: ctx.partial.clone(),
                        panel: id,
                        message: e.to_string(),
                        collected,
                        expected,
                    },
                };
                if let Some(events) = &ctx.events {
                    notify(events, event);
                }
                (index, result)
            });
            (panel, handle)
        })
        .collect();

    let mut collected = BTreeMap::new();
    let mut failures = Vec::new();
    for (panel, handle) in handles {
        match handle.await {
            Ok((index, Ok(content))) => {
                collected.insert(index, content);
            }
            Ok((_, Err(error))) => {
                warn!("[{}] Panel '{}' failed: {}", ctx.partial, panel, error);
                failures.push(PanelFailure { panel, error });
            }
            Err(join_error) => {
                let error = ViewerError::Task(join_error.to_string());
                warn!("[{}] Panel '{}' task failed: {}", ctx.partial, panel, error);
                failures.push(PanelFailure { panel, error });
            }
        }
    }

    if !failures.is_empty() {
        return Err(ViewerError::PanelsFailed { failures });
    }
    debug!("[{}] All {} panel(s) collected", ctx.partial, expected);
    Ok(collected.into_values().collect())
}

/// Never waits on the receiver: a full channel drops the event.
pub(crate) fn notify(events: &async_channel::Sender<PanelEvent>, event: PanelEvent) {
    match events.try_send(event) {
        Ok(()) => {}
        Err(async_channel::TrySendError::Full(event)) => {
            warn!("Panel event channel full, dropping {:?}", event);
        }
        Err(async_channel::TrySendError::Closed(_)) => {}
    }
}

async fn produce(job: PanelJob, ctx: &PanelContext) -> Result<CollectedPanel, ViewerError> {
    let template_id = job.panel.template_id.clone().unwrap_or_default();
    let content = match job.kind {
        JobKind::Fetch { url } => {
            let source = Arc::clone(&ctx.source);
            let templates = Arc::clone(&ctx.templates);
            let highlighter = Arc::clone(&ctx.highlighter);
            let panel = job.panel.id.clone();
            let language = job.panel.language.clone().unwrap_or_default();

            task::spawn_blocking(move || {
                let text = source
                    .load_text(&url)
                    .map_err(|source| ViewerError::PanelFetch { panel, source })?;
                let code = highlighter.highlight(&text, &language);
                templates.render(&template_id, &json!({ "language": "html", "code": code }))
            })
            .await
            .map_err(|e| ViewerError::Task(e.to_string()))??
        }
        JobKind::Render => ctx.templates.render(&template_id, ctx.pattern_data.as_ref())?,
    };

    Ok(CollectedPanel {
        panel: job.panel,
        content,
    })
}
