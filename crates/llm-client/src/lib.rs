//! `llm-client`: async client for OpenAI-compatible chat completions.
//!
//! ```rust,ignore
//! use llm_client::{Completion, LlmClient};
//!
//! let client = LlmClient::new("https://api.openai.com/v1", std::env::var("OPENAI_API_KEY").ok());
//! let text = client
//!     .complete(&Completion {
//!         model: "gpt-4o".into(),
//!         system: "Answer in one word.".into(),
//!         user: "Capital of Brazil?".into(),
//!         max_tokens: 20,
//!         temperature: 0.0,
//!     })
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod types;


pub use client::{Completion, LlmClient};
pub use error::LlmError;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, LlmError>;
