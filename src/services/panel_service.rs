use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::models::{PanelSnapshot, SearchResultBatch};
use crate::panel::html::{render_content, render_page};
use crate::panel::{ClearTrigger, HandleOutcome, PanelAction, ResultsPanel, PLACEHOLDER_MESSAGE};

/// Shares one `ResultsPanel` across workers and publishes the rendered
/// fragment to stream subscribers after every change.
#[derive(Clone)]
pub struct PanelService {
    panel: Arc<Mutex<ResultsPanel>>,
    updates: broadcast::Sender<String>,
}

impl PanelService {
    pub fn new(clear_trigger: Option<ClearTrigger>, stream_buffer: usize) -> Self {
        let (updates, _) = broadcast::channel(stream_buffer.max(1));
        Self {
            panel: Arc::new(Mutex::new(ResultsPanel::new(clear_trigger))),
            updates,
        }
    }

    /// Applies a batch and returns the outcome with the resulting group count.
    pub async fn handle_keywords(&self, batch: &SearchResultBatch) -> (HandleOutcome, usize) {
        let mut panel = self.panel.lock().await;
        let outcome = panel.handle_keywords(batch);
        if outcome != HandleOutcome::Ignored {
            self.publish(&panel);
        }
        (outcome, panel.group_count())
    }

    pub async fn clear_results(&self) {
        let mut panel = self.panel.lock().await;
        panel.clear_results();
        self.publish(&panel);
    }

    pub async fn activate(&self, element_id: &str) -> Option<PanelAction> {
        let mut panel = self.panel.lock().await;
        let action = panel.activate(element_id)?;
        self.publish(&panel);
        Some(action)
    }

    pub async fn snapshot(&self) -> PanelSnapshot {
        let panel = self.panel.lock().await;
        PanelSnapshot {
            group_count: panel.group_count(),
            placeholder: panel
                .shows_placeholder()
                .then(|| PLACEHOLDER_MESSAGE.to_string()),
            groups: panel.groups().cloned().collect(),
        }
    }

    pub async fn fragment(&self) -> String {
        let panel = self.panel.lock().await;
        render_content(&panel.content())
    }

    pub async fn page(&self) -> String {
        let panel = self.panel.lock().await;
        render_page(panel.bindings(), &panel.content())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.updates.subscribe()
    }

    fn publish(&self, panel: &ResultsPanel) {
        let fragment = render_content(&panel.content());
        // No subscribers is not an error.
        if let Ok(receivers) = self.updates.send(fragment) {
            debug!("Published panel update to {} subscribers", receivers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn batch(keyword: &str) -> SearchResultBatch {
        SearchResultBatch {
            keywords: vec![keyword.to_string()],
            pair_id: Some(format!("pair-{keyword}")),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn snapshot_reflects_added_groups() {
        let service = PanelService::new(None, 4);
        let (outcome, count) = service.handle_keywords(&batch("rust")).await;
        assert!(matches!(outcome, HandleOutcome::Added { evicted: None, .. }));
        assert_eq!(count, 1);

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.group_count, 1);
        assert!(snapshot.placeholder.is_none());
        assert_eq!(snapshot.groups[0].pair_id.as_deref(), Some("pair-rust"));
    }

    #[actix_rt::test]
    async fn entries_without_usable_links_do_not_drop_the_group() {
        let service = PanelService::new(None, 4);
        let mut partial = batch("rust");
        partial.articles.push(Article::default());

        let (outcome, count) = service.handle_keywords(&partial).await;
        assert!(matches!(outcome, HandleOutcome::Added { .. }));
        assert_eq!(count, 1);
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.groups[0].articles.len(), 1);
        assert!(snapshot.groups[0].articles[0].href.is_none());
    }

    #[actix_rt::test]
    async fn empty_batch_is_ignored() {
        let service = PanelService::new(None, 4);
        let empty = SearchResultBatch {
            articles: vec![Article::default()],
            ..Default::default()
        };

        let (outcome, count) = service.handle_keywords(&empty).await;
        assert_eq!(outcome, HandleOutcome::Ignored);
        assert_eq!(count, 0);
    }

    #[actix_rt::test]
    async fn subscribers_receive_rendered_updates() {
        let service = PanelService::new(None, 4);
        let mut updates = service.subscribe();

        service.handle_keywords(&batch("tokio")).await;
        let fragment = updates.recv().await.unwrap();
        assert!(fragment.contains(r#"<span class="keyword-tag">tokio</span>"#));

        service.clear_results().await;
        let fragment = updates.recv().await.unwrap();
        assert!(fragment.contains(PLACEHOLDER_MESSAGE));
    }

    #[actix_rt::test]
    async fn ignored_batches_publish_nothing() {
        let service = PanelService::new(None, 4);
        let mut updates = service.subscribe();

        service.handle_keywords(&SearchResultBatch::default()).await;
        assert!(updates.try_recv().is_err());
    }

    #[actix_rt::test]
    async fn activation_requires_a_bound_control() {
        let service = PanelService::new(Some(ClearTrigger::new("clear-results")), 4);
        service.handle_keywords(&batch("a")).await;

        assert_eq!(service.activate("missing").await, None);
        assert_eq!(service.snapshot().await.group_count, 1);

        assert_eq!(
            service.activate("clear-results").await,
            Some(PanelAction::ClearResults)
        );
        assert_eq!(
            service.snapshot().await.placeholder.as_deref(),
            Some(PLACEHOLDER_MESSAGE)
        );
    }
}
