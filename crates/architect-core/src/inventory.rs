//! Snapshot of the product repository's files, classified by path.
//!
//! Fetching is done by the server's GitHub client; this module only turns a
//! list of blob paths into an [`Inventory`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An inventory older than this is refreshed on read.
pub const STALE_AFTER_MINUTES: i64 = 60;

const CODE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];
const IGNORED_DIRS: &[&str] = &["node_modules", ".next"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Page,
    Api,
    #[serde(alias = "componente")]
    Component,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Page => "page",
            PageKind::Api => "api",
            PageKind::Component => "component",
        }
    }
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEntry {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "caminho")]
    pub path: String,
    #[serde(alias = "tipo")]
    pub kind: PageKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "caminho")]
    pub path: String,
}

impl FileEntry {
    fn from_path(path: &str) -> Self {
        Self {
            name: file_name(path).to_string(),
            path: path.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryStats {
    #[serde(alias = "total_codigo")]
    pub total_code: usize,
    #[serde(alias = "paginas")]
    pub pages: usize,
    #[serde(alias = "componentes")]
    pub components: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    #[serde(alias = "mensagem")]
    pub message: String,
    #[serde(alias = "autor")]
    pub author: String,
    #[serde(alias = "data")]
    pub date: String,
    /// Abbreviated to seven characters.
    pub sha: String,
}

impl CommitSummary {
    pub fn new(message: &str, author: &str, date: &str, sha: &str) -> Self {
        Self {
            message: message.to_string(),
            author: author.to_string(),
            date: date.to_string(),
            sha: sha.chars().take(7).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default, alias = "paginas")]
    pub pages: Vec<PageEntry>,
    #[serde(default, alias = "componentes")]
    pub components: Vec<FileEntry>,
    #[serde(default)]
    pub apis: Vec<FileEntry>,
    #[serde(default, alias = "tabelas")]
    pub tables: Vec<String>,
    #[serde(default)]
    pub stats: InventoryStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "ultimo_commit")]
    pub last_commit: Option<CommitSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "atualizado_em")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Inventory {
    /// Never synced, or synced more than an hour before `now`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.updated_at {
            None => true,
            Some(at) => now - at > Duration::minutes(STALE_AFTER_MINUTES),
        }
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_code(path: &str) -> bool {
    CODE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        && !IGNORED_DIRS.iter().any(|dir| path.contains(dir))
}

fn is_page(path: &str) -> bool {
    let p = path.to_lowercase();
    ["/app/", "/pages/", "page.", "route."]
        .iter()
        .any(|needle| p.contains(needle))
}

fn page_kind(path: &str) -> PageKind {
    if path.contains("page") {
        PageKind::Page
    } else if path.contains("route") {
        PageKind::Api
    } else {
        PageKind::Component
    }
}

/// Classify the blob paths of a repository tree.
pub fn classify<'a, I>(
    blobs: I,
    branch: Option<String>,
    last_commit: Option<CommitSummary>,
    now: DateTime<Utc>,
) -> Inventory
where
    I: IntoIterator<Item = &'a str>,
{
    let blobs: Vec<&str> = blobs.into_iter().collect();
    let code: Vec<&str> = blobs.iter().copied().filter(|p| is_code(p)).collect();

    let pages: Vec<PageEntry> = code
        .iter()
        .filter(|p| is_page(p))
        .map(|p| PageEntry {
            name: file_name(p).to_string(),
            path: p.to_string(),
            kind: page_kind(p),
        })
        .collect();

    let components: Vec<FileEntry> = code
        .iter()
        .filter(|p| (p.contains("/components/") || p.contains("/ui/")) && !p.contains("page"))
        .map(|p| FileEntry::from_path(p))
        .collect();

    let apis = code
        .iter()
        .filter(|p| p.contains("/api/"))
        .map(|p| FileEntry::from_path(p))
        .collect();

    let tables = blobs
        .iter()
        .filter(|p| p.ends_with(".sql"))
        .map(|p| p.to_string())
        .collect();

    Inventory {
        stats: InventoryStats {
            total_code: code.len(),
            pages: pages.len(),
            components: components.len(),
        },
        pages,
        components,
        apis,
        tables,
        branch,
        last_commit,
        updated_at: Some(now),
    }
}
