use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ArchitectError;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[serde(alias = "alta")]
    High,
    #[default]
    #[serde(alias = "media")]
    Medium,
    #[serde(alias = "baixa")]
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ArchitectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ArchitectError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// BacklogStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogStatus {
    #[default]
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "em_desenvolvimento")]
    InDevelopment,
    #[serde(alias = "concluido")]
    Done,
    #[serde(alias = "cancelado")]
    Cancelled,
}

impl BacklogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BacklogStatus::Pending => "pending",
            BacklogStatus::InDevelopment => "in_development",
            BacklogStatus::Done => "done",
            BacklogStatus::Cancelled => "cancelled",
        }
    }

    /// Open items are shown in the queue; done and cancelled ones are not.
    pub fn is_open(self) -> bool {
        matches!(self, BacklogStatus::Pending | BacklogStatus::InDevelopment)
    }
}

impl fmt::Display for BacklogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BacklogStatus {
    type Err = ArchitectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BacklogStatus::Pending),
            "in_development" => Ok(BacklogStatus::InDevelopment),
            "done" => Ok(BacklogStatus::Done),
            "cancelled" => Ok(BacklogStatus::Cancelled),
            _ => Err(ArchitectError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PhaseItemStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseItemStatus {
    /// A prompt was generated for this item.
    #[serde(alias = "gerado")]
    Generated,
    /// The prompt was pasted into the builder and accepted.
    #[serde(alias = "ok", alias = "usado")]
    Used,
}

impl PhaseItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseItemStatus::Generated => "generated",
            PhaseItemStatus::Used => "used",
        }
    }
}

impl fmt::Display for PhaseItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhaseItemStatus {
    type Err = ArchitectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generated" => Ok(PhaseItemStatus::Generated),
            "used" | "ok" => Ok(PhaseItemStatus::Used),
            _ => Err(ArchitectError::InvalidStatus(s.to_string())),
        }
    }
}
