use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ArchitectError, Result};
use crate::types::{BacklogStatus, Priority};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogItem {
    pub id: String,
    #[serde(default)]
    pub feature: String,
    #[serde(default, alias = "descricao")]
    pub description: String,
    #[serde(default, alias = "fase")]
    pub phase: String,
    #[serde(default, alias = "prioridade")]
    pub priority: Priority,
    #[serde(default)]
    pub status: BacklogStatus,
    #[serde(alias = "criado_em")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "concluido_em")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl BacklogItem {
    pub fn new(feature: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            feature: feature.into(),
            description: String::new(),
            phase: phase.into(),
            priority: Priority::default(),
            status: BacklogStatus::default(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Backlog list operations (operate on a mutable Vec<BacklogItem>)
// ---------------------------------------------------------------------------

pub fn add_item(backlog: &mut Vec<BacklogItem>, item: BacklogItem) -> String {
    let id = item.id.clone();
    backlog.push(item);
    id
}

/// Set the status of `id`; moving to `done` stamps `completed_at`.
pub fn update_status(backlog: &mut [BacklogItem], id: &str, status: BacklogStatus) -> Result<()> {
    let item = backlog
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| ArchitectError::BacklogItemNotFound(id.to_string()))?;
    item.status = status;
    if status == BacklogStatus::Done {
        item.completed_at = Some(Utc::now());
    }
    Ok(())
}

/// Items still in the queue, in insertion order.
pub fn open_items(backlog: &[BacklogItem]) -> impl Iterator<Item = &BacklogItem> {
    backlog.iter().filter(|b| b.status.is_open())
}
