use serde::{Deserialize, Serialize};

use crate::backlog::BacklogItem;
use crate::inventory::Inventory;
use crate::phase::{default_phases, Phases};
use crate::tree::Node;

pub const DEFAULT_PROJECT: &str = "INDUSALES v5.0";

/// The single persisted document behind every command and endpoint.
///
/// Files written by the earlier Portuguese-keyed tracker (`estrutura`,
/// `fases`, `inventario`, ...) load through serde aliases and are written
/// back with the English keys on the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingDocument {
    #[serde(default = "default_project")]
    pub project: String,
    #[serde(default, alias = "inventario")]
    pub inventory: Inventory,
    #[serde(default)]
    pub backlog: Vec<BacklogItem>,
    #[serde(default = "default_phases", alias = "fases")]
    pub phases: Phases,
    /// Absent until the tree is first loaded, then always present.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "estrutura")]
    pub tree: Option<Vec<Node>>,
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

impl Default for TrackingDocument {
    fn default() -> Self {
        Self {
            project: default_project(),
            inventory: Inventory::default(),
            backlog: Vec::new(),
            phases: default_phases(),
            tree: None,
        }
    }
}
