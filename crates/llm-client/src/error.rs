use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response had no message content")]
    EmptyResponse,

    #[error("failed to parse completion response: {0}")]
    Parse(#[from] serde_json::Error),
}
