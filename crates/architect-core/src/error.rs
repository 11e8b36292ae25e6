use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchitectError {
    #[error("backlog item not found: {0}")]
    BacklogItemNotFound(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid prompt mode '{0}': expected command or blueprint")]
    InvalidMode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArchitectError>;
