use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::aggregate::{group, OfferBuilder};
use crate::error::LoadError;
use crate::loader::{CategoryLoad, CategoryLoader};
use crate::models::{OfferGroup, DEFAULT_BOARD_LABEL, EMPTY_BOARD_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BoardStatus {
    Idle,
    Loading,
    Ready,
    Empty,
    /// Some sheets failed; whatever loaded is still shown.
    Partial { failed: Vec<String> },
    Error { message: String },
}

/// What the page shows for the active category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub category_key: Option<String>,
    pub label: String,
    pub groups: Vec<OfferGroup>,
    pub status: BoardStatus,
    /// When the shown sheets finished loading; absent until a load completes.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            category_key: None,
            label: DEFAULT_BOARD_LABEL.to_string(),
            groups: Vec::new(),
            status: BoardStatus::Idle,
            loaded_at: None,
        }
    }
}

impl BoardView {
    pub fn from_load(load: &CategoryLoad, builder: &OfferBuilder) -> Self {
        let offers = builder.build_included(&load.rows);
        let groups = group(offers, Some(&load.category));

        let status = if !load.failed.is_empty() {
            BoardStatus::Partial {
                failed: load.failed_files(),
            }
        } else if groups.is_empty() {
            BoardStatus::Empty
        } else {
            BoardStatus::Ready
        };

        Self {
            category_key: Some(load.category.key.clone()),
            label: load.category.label.clone(),
            groups,
            status,
            loaded_at: Some(load.loaded_at),
        }
    }

    pub fn from_error(key: &str, error: &LoadError) -> Self {
        Self {
            category_key: Some(key.to_string()),
            label: DEFAULT_BOARD_LABEL.to_string(),
            groups: Vec::new(),
            status: BoardStatus::Error {
                message: error.to_string(),
            },
            loaded_at: None,
        }
    }

    pub fn offer_count(&self) -> usize {
        self.groups.iter().map(|g| g.offers.len()).sum()
    }

    /// Status line to show alongside (or instead of) the groups.
    pub fn message(&self) -> Option<String> {
        match &self.status {
            BoardStatus::Idle | BoardStatus::Ready => None,
            BoardStatus::Loading => Some("Loading...".to_string()),
            BoardStatus::Empty => Some(EMPTY_BOARD_MESSAGE.to_string()),
            BoardStatus::Partial { failed } => {
                Some(format!("Some files failed to load: {}", failed.join(", ")))
            }
            BoardStatus::Error { message } => Some(message.clone()),
        }
    }
}

/// Identifies one activation; only the newest ticket may publish its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    key: String,
}

impl LoadTicket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Active-category state. A newer activation always supersedes an older one,
/// whichever finishes loading first.
pub struct Board {
    loader: CategoryLoader,
    builder: OfferBuilder,
    generation: AtomicU64,
    view: RwLock<BoardView>,
}

impl Board {
    pub fn new(loader: CategoryLoader, builder: OfferBuilder) -> Self {
        Self {
            loader,
            builder,
            generation: AtomicU64::new(0),
            view: RwLock::new(BoardView::default()),
        }
    }

    pub fn loader(&self) -> &CategoryLoader {
        &self.loader
    }

    pub async fn view(&self) -> BoardView {
        self.view.read().await.clone()
    }

    pub async fn begin(&self, key: &str) -> LoadTicket {
        let mut view = self.view.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let label = self
            .loader
            .category(key)
            .map(|c| c.label.clone())
            .unwrap_or_else(|| DEFAULT_BOARD_LABEL.to_string());

        *view = BoardView {
            category_key: Some(key.to_string()),
            label,
            groups: Vec::new(),
            status: BoardStatus::Loading,
            loaded_at: None,
        };

        LoadTicket {
            generation,
            key: key.to_string(),
        }
    }

    /// Publishes a load result. Returns false, leaving the view untouched,
    /// when a newer activation has started since `ticket` was issued.
    pub async fn finish(&self, ticket: LoadTicket, result: Result<CategoryLoad, LoadError>) -> bool {
        let mut view = self.view.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            debug!(
                "Discarding stale load of {} (generation {})",
                ticket.key, ticket.generation
            );
            return false;
        }

        *view = match &result {
            Ok(load) => BoardView::from_load(load, &self.builder),
            Err(e) => BoardView::from_error(&ticket.key, e),
        };
        info!("Board showing {} offers for {}", view.offer_count(), view.label);
        true
    }

    /// Switches to `key`, loads it and publishes the result if still current.
    pub async fn activate(&self, key: &str) -> bool {
        let ticket = self.begin(key).await;
        let result = self.loader.load(key).await;
        self.finish(ticket, result).await
    }
}
