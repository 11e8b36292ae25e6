//! GitHub REST client: repository inventory, diffs, and review comments.

use std::time::Duration;

use architect_core::config::GitHubConfig;
use architect_core::inventory::{self, CommitSummary, Inventory};
use architect_core::review::ReviewTarget;
use chrono::Utc;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const CLIENT_AGENT: &str = "lovable-architect";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned {status} for {url}")]
    Status { status: u16, url: String },
}

// ---------------------------------------------------------------------------
// Response shapes (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    date: String,
}

#[derive(Deserialize)]
struct PullInfo {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
struct CreatedComment {
    #[serde(default)]
    html_url: Option<String>,
}

// ---------------------------------------------------------------------------
// GitHubClient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, token: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(CLIENT_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn repo_url(&self, rest: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_base, self.owner, self.repo, rest)
    }

    fn request(&self, method: reqwest::Method, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, accept)
            .header(USER_AGENT, CLIENT_AGENT);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, builder: reqwest::RequestBuilder, url: &str) -> Result<reqwest::Response, GitHubError> {
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            return Err(GitHubError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, rest: &str) -> Result<T, GitHubError> {
        let url = self.repo_url(rest);
        let resp = self
            .send(self.request(reqwest::Method::GET, &url, JSON_MEDIA_TYPE), &url)
            .await?;
        Ok(resp.json().await?)
    }

    async fn get_diff(&self, rest: &str) -> Result<String, GitHubError> {
        let url = self.repo_url(rest);
        let resp = self
            .send(self.request(reqwest::Method::GET, &url, DIFF_MEDIA_TYPE), &url)
            .await?;
        Ok(resp.text().await?)
    }

    // -----------------------------------------------------------------------
    // Inventory
    // -----------------------------------------------------------------------

    /// Pull the default branch's tree and latest commit, classified.
    pub async fn fetch_inventory(&self) -> Result<Inventory, GitHubError> {
        let info: RepoInfo = self.get_json("").await?;
        let branch = info.default_branch;

        let tree: TreeResponse = self
            .get_json(&format!("/git/trees/{branch}?recursive=1"))
            .await?;
        let commits: Vec<CommitEntry> = self
            .get_json(&format!("/commits?per_page=1&sha={branch}"))
            .await?;

        let last_commit = commits.into_iter().next().map(|c| {
            let (author, date) = c
                .commit
                .author
                .map(|a| (a.name, a.date))
                .unwrap_or_default();
            CommitSummary::new(&c.commit.message, &author, &date, &c.sha)
        });

        let blobs = tree
            .tree
            .iter()
            .filter(|e| e.kind == "blob")
            .map(|e| e.path.as_str());
        let inv = inventory::classify(blobs, Some(branch.clone()), last_commit, Utc::now());

        tracing::info!(
            owner = %self.owner,
            repo = %self.repo,
            branch = %branch,
            pages = inv.stats.pages,
            components = inv.stats.components,
            "inventory synced"
        );
        Ok(inv)
    }

    // -----------------------------------------------------------------------
    // Reviews
    // -----------------------------------------------------------------------

    pub async fn pull_request_title(&self, number: u64) -> Result<String, GitHubError> {
        let pr: PullInfo = self.get_json(&format!("/pulls/{number}")).await?;
        Ok(pr.title)
    }

    pub async fn diff(&self, target: &ReviewTarget) -> Result<String, GitHubError> {
        match target {
            ReviewTarget::PullRequest(n) => self.get_diff(&format!("/pulls/{n}")).await,
            ReviewTarget::Commit(sha) => self.get_diff(&format!("/commits/{sha}")).await,
        }
    }

    /// Post `body` as a comment. Returns the comment's web URL when GitHub
    /// reports one.
    pub async fn post_comment(
        &self,
        target: &ReviewTarget,
        body: &str,
    ) -> Result<Option<String>, GitHubError> {
        let rest = match target {
            ReviewTarget::PullRequest(n) => format!("/issues/{n}/comments"),
            ReviewTarget::Commit(sha) => format!("/commits/{sha}/comments"),
        };
        let url = self.repo_url(&rest);
        let builder = self
            .request(reqwest::Method::POST, &url, JSON_MEDIA_TYPE)
            .json(&serde_json::json!({ "body": body }));
        let resp = self.send(builder, &url).await?;
        let created: CreatedComment = resp.json().await?;
        Ok(created.html_url)
    }
}
