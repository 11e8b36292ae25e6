use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ArchitectError, Result};
use crate::types::PhaseItemStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseItem {
    #[serde(alias = "nome")]
    pub name: String,
    pub status: PhaseItemStatus,
    #[serde(alias = "data")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<PhaseItem>,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Percentage of items already used in the builder.
    pub fn progress(&self) -> u32 {
        if self.items.is_empty() {
            return 0;
        }
        let used = self
            .items
            .iter()
            .filter(|i| i.status == PhaseItemStatus::Used)
            .count();
        (used * 100 / self.items.len()) as u32
    }
}

pub type Phases = BTreeMap<String, Phase>;

/// Fixed phase list of the project, keyed "1.1", "1.2", …
pub fn default_phases() -> Phases {
    [
        ("1.1", "Authentication and Hierarchy"),
        ("1.2", "Dashboards per Profile"),
        ("1.3", "Approval Workflow"),
        ("2.1", "Manufacturer Catalog"),
        ("2.2", "Reseller Catalog"),
        ("3.1", "Cart and Orders"),
        ("3.2", "Store Credit"),
        ("4.1", "CRM and Customers"),
        ("4.2", "WhatsApp Notifications"),
    ]
    .into_iter()
    .map(|(key, name)| (key.to_string(), Phase::new(name)))
    .collect()
}

/// Append an item to the log of phase `key`.
pub fn record_item(
    phases: &mut Phases,
    key: &str,
    name: impl Into<String>,
    status: PhaseItemStatus,
) -> Result<()> {
    let phase = phases
        .get_mut(key)
        .ok_or_else(|| ArchitectError::InvalidPhase(key.to_string()))?;
    phase.items.push(PhaseItem {
        name: name.into(),
        status,
        date: Utc::now(),
    });
    Ok(())
}
