use crate::error::Result;
use crate::paths;
use crate::review::DEFAULT_MAX_DIFF_CHARS;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_project_name")]
    pub name: String,
}

fn default_project_name() -> String {
    crate::document::DEFAULT_PROJECT.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// GitHubConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_repo")]
    pub repo: String,
    #[serde(default = "default_github_api")]
    pub api_base: String,
}

fn default_owner() -> String {
    "indusales".to_string()
}

fn default_repo() -> String {
    "indusales-connect-sell".to_string()
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            api_base: default_github_api(),
        }
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_api")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_prompt_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
}

fn default_llm_api() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_prompt_tokens() -> u32 {
    200
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_llm_api(),
            model: default_model(),
            max_tokens: default_prompt_tokens(),
            temperature: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_max_diff")]
    pub max_diff_chars: usize,
    #[serde(default = "default_review_tokens")]
    pub max_tokens: u32,
}

fn default_max_diff() -> usize {
    DEFAULT_MAX_DIFF_CHARS
}

fn default_review_tokens() -> u32 {
    800
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_diff_chars: default_max_diff(),
            max_tokens: default_review_tokens(),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub users: Vec<UserEntry>,
    #[serde(default = "default_session_hours")]
    pub session_hours: u32,
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_session_hours() -> u32 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            session_hours: default_session_hours(),
            secure_cookie: false,
        }
    }
}

impl AuthConfig {
    /// Add `username`, replacing the password of an existing entry.
    pub fn upsert_user(&mut self, username: &str, password: &str) {
        match self.users.iter_mut().find(|u| u.username == username) {
            Some(u) => u.password = password.to_string(),
            None => self.users.push(UserEntry {
                username: username.to_string(),
                password: password.to_string(),
            }),
        }
    }

    pub fn check(&self, username: &str, password: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.username == username && u.password == password)
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            project: ProjectConfig::default(),
            github: GitHubConfig::default(),
            llm: LlmConfig::default(),
            review: ReviewConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Config {
    /// Missing file means an uninitialised project: every section defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.auth.users.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no users configured: the dashboard and API are unauthenticated"
                    .to_string(),
            });
        }

        if self.auth.session_hours == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "auth.session_hours must be at least 1".to_string(),
            });
        }

        if self.github.owner.trim().is_empty() || self.github.repo.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "github.owner and github.repo must be set".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "llm.temperature {} is outside 0.0..=2.0",
                    self.llm.temperature
                ),
            });
        }

        if self.review.enabled && self.review.max_diff_chars == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "review.max_diff_chars must be positive when reviews are enabled"
                    .to_string(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.llm.model, "gpt-4o");
        assert_eq!(cfg.llm.max_tokens, 200);
        assert_eq!(cfg.review.max_diff_chars, 12_000);
        assert_eq!(cfg.auth.session_hours, 24);
    }

    #[test]
    fn partial_yaml_fills_other_sections() {
        let yaml = "github:\n  owner: acme\nreview:\n  enabled: true\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.github.owner, "acme");
        assert_eq!(cfg.github.repo, "indusales-connect-sell");
        assert!(cfg.review.enabled);
        assert_eq!(cfg.review.max_tokens, 800);
        assert_eq!(cfg.project.name, "INDUSALES v5.0");
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.auth.upsert_user("ana", "s3cret");
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert!(loaded.auth.check("ana", "s3cret"));
        assert!(!loaded.auth.check("ana", "wrong"));
    }

    #[test]
    fn upsert_replaces_password() {
        let mut auth = AuthConfig::default();
        auth.upsert_user("ana", "one");
        auth.upsert_user("ana", "two");
        assert_eq!(auth.users.len(), 1);
        assert!(auth.check("ana", "two"));
        assert!(auth.has_user("ana"));
        assert!(!auth.has_user("bob"));
    }

    #[test]
    fn validate_flags_missing_users_and_bad_values() {
        let mut cfg = Config::default();
        cfg.llm.temperature = 3.0;
        cfg.auth.session_hours = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error));

        cfg.llm.temperature = 0.0;
        cfg.auth.session_hours = 8;
        cfg.auth.upsert_user("ana", "x");
        assert!(cfg.validate().is_empty());
    }
}
