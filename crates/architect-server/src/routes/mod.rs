pub mod architect;
pub mod backlog;
pub mod inventory;
pub mod pages;
pub mod tracking;
pub mod tree;
pub mod webhook;

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
