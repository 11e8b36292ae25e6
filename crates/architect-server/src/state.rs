use std::path::PathBuf;
use std::sync::Arc;

use architect_core::config::Config;
use architect_core::store::{DocumentStore, JsonFileStore};
use llm_client::LlmClient;
use tokio::sync::Mutex;

use crate::auth::AuthGate;
use crate::error::AppError;
use crate::github::GitHubClient;

pub type SharedStore = Arc<dyn DocumentStore + Send + Sync>;

/// Secrets read from the environment by the CLI.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub github_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub session_secret: Option<String>,
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub store: SharedStore,
    pub config: Arc<Config>,
    pub auth: Arc<AuthGate>,
    pub llm: LlmClient,
    pub github: GitHubClient,
    pub webhook_secret: Option<Arc<str>>,
    /// Held across every read-modify-write of the document.
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// State backed by `<root>/.architect/tracking.json`.
    pub fn new(root: PathBuf, config: Config, secrets: Secrets) -> Self {
        let store: SharedStore = Arc::new(JsonFileStore::new(&root));
        Self::with_store(root, store, config, secrets)
    }

    pub fn with_store(root: PathBuf, store: SharedStore, config: Config, secrets: Secrets) -> Self {
        let auth = AuthGate::new(config.auth.clone(), secrets.session_secret.as_deref());
        if !auth.enabled() {
            tracing::warn!("no users configured: dashboard and API are open to anyone");
        }
        Self {
            root,
            store,
            llm: LlmClient::new(config.llm.api_base.clone(), secrets.openai_api_key),
            github: GitHubClient::new(&config.github, secrets.github_token),
            webhook_secret: secrets.webhook_secret.filter(|s| !s.is_empty()).map(Arc::from),
            auth: Arc::new(auth),
            config: Arc::new(config),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run `f` against the store on the blocking pool.
    pub async fn read<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn DocumentStore) -> architect_core::Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || f(&*store))
            .await
            .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
        Ok(result)
    }

    /// Like [`read`](Self::read), but serialised with every other writer.
    ///
    /// The guard moves into the blocking task, so a dropped request future
    /// does not release the lock before the write has finished.
    pub async fn write<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn DocumentStore) -> architect_core::Result<T> + Send + 'static,
    {
        let guard = self.write_lock.clone().lock_owned().await;
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            f(&*store)
        })
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
        Ok(result)
    }
}
