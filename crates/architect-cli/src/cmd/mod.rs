pub mod backlog;
pub mod init;
pub mod inventory;
pub mod phase;
pub mod prompt;
pub mod review;
pub mod serve;
pub mod tree;

use std::path::Path;

use anyhow::Context;
use architect_core::config::{Config, WarnLevel};
use architect_core::store::JsonFileStore;

/// Credentials read from the environment. Never stored in config.yaml.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Secrets {
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true, global = true)]
    pub webhook_secret: Option<String>,

    #[arg(long, env = "ARCHITECT_SESSION_SECRET", hide_env_values = true, global = true)]
    pub session_secret: Option<String>,
}

impl From<Secrets> for architect_server::Secrets {
    fn from(s: Secrets) -> Self {
        Self {
            github_token: s.github_token,
            openai_api_key: s.openai_api_key,
            webhook_secret: s.webhook_secret,
            session_secret: s.session_secret,
        }
    }
}

/// Load config.yaml and surface validation warnings on stderr.
pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    let config = Config::load(root).context("failed to read .architect/config.yaml")?;
    for w in config.validate() {
        match w.level {
            WarnLevel::Error => tracing::error!("config: {}", w.message),
            WarnLevel::Warning => tracing::warn!("config: {}", w.message),
        }
    }
    Ok(config)
}

pub fn store(root: &Path) -> JsonFileStore {
    JsonFileStore::new(root)
}

pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("failed to start async runtime")
}
