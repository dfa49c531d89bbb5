use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::SearchResultBatch;
use crate::panel::view::{build_group, ResultGroup};

/// Maximum number of result groups kept on the panel.
pub const MAX_RESULT_GROUPS: usize = 10;

pub const PLACEHOLDER_MESSAGE: &str = "Keywords and related info will appear here.";

/// The host control that resets the panel when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearTrigger {
    pub element_id: String,
}

impl ClearTrigger {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAction {
    ClearResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    Click,
}

/// A host control event wired to a panel action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    pub element_id: String,
    pub event: ControlEvent,
    pub action: PanelAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The batch had no keywords; nothing changed.
    Ignored,
    Added {
        group_id: Uuid,
        evicted: Option<Uuid>,
    },
}

/// What the panel currently shows. Exactly one of the two, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelContent<'a> {
    Placeholder(&'static str),
    Groups(&'a VecDeque<ResultGroup>),
}

#[derive(Debug)]
pub struct ResultsPanel {
    /// Newest first.
    groups: VecDeque<ResultGroup>,
    bindings: Vec<EventBinding>,
}

impl ResultsPanel {
    pub fn new(clear_trigger: Option<ClearTrigger>) -> Self {
        let mut panel = Self {
            groups: VecDeque::with_capacity(MAX_RESULT_GROUPS + 1),
            bindings: Vec::new(),
        };

        match clear_trigger {
            Some(trigger) => {
                debug!("Binding clear control #{}", trigger.element_id);
                panel.bindings.push(EventBinding {
                    element_id: trigger.element_id,
                    event: ControlEvent::Click,
                    action: PanelAction::ClearResults,
                });
            }
            None => debug!("No clear control present, skipping binding"),
        }

        panel
    }

    pub fn handle_keywords(&mut self, batch: &SearchResultBatch) -> HandleOutcome {
        let Some(group) = build_group(batch) else {
            debug!("Ignoring batch without keywords (pair_id: {:?})", batch.pair_id);
            return HandleOutcome::Ignored;
        };

        let group_id = group.id;
        info!(
            "Adding result group {} with {} keywords, {} articles, {} images",
            group_id,
            group.keywords.len(),
            group.articles.len(),
            group.images.len()
        );
        self.groups.push_front(group);

        let evicted = if self.groups.len() > MAX_RESULT_GROUPS {
            self.groups.pop_back().map(|oldest| {
                info!("Evicting oldest result group {}", oldest.id);
                oldest.id
            })
        } else {
            None
        };

        HandleOutcome::Added { group_id, evicted }
    }

    pub fn clear_results(&mut self) {
        if !self.groups.is_empty() {
            info!("Clearing {} result groups", self.groups.len());
        }
        self.groups.clear();
    }

    /// Runs the action bound to `element_id`, if any.
    pub fn activate(&mut self, element_id: &str) -> Option<PanelAction> {
        let action = self
            .bindings
            .iter()
            .find(|binding| binding.element_id == element_id)
            .map(|binding| binding.action)?;

        match action {
            PanelAction::ClearResults => self.clear_results(),
        }
        Some(action)
    }

    pub fn content(&self) -> PanelContent<'_> {
        if self.groups.is_empty() {
            PanelContent::Placeholder(PLACEHOLDER_MESSAGE)
        } else {
            PanelContent::Groups(&self.groups)
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = &ResultGroup> {
        self.groups.iter()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn shows_placeholder(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn bindings(&self) -> &[EventBinding] {
        &self.bindings
    }
}
