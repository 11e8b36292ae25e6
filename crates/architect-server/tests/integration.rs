use std::path::PathBuf;
use std::sync::Arc;

use architect_core::config::Config;
use architect_core::store::{DocumentStore, JsonFileStore, MemoryStore};
use architect_server::state::SharedStore;
use architect_server::{build_router, AppState, Secrets};
use axum::http::StatusCode;
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use sha2::Sha256;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn memory_state(config: Config, secrets: Secrets) -> AppState {
    let store: SharedStore = Arc::new(MemoryStore::default());
    AppState::with_store(PathBuf::from("."), store, config, secrets)
}

fn open_app() -> axum::Router {
    build_router(memory_state(Config::default(), Secrets::default()))
}

async fn send(
    app: axum::Router,
    req: axum::http::Request<axum::body::Body>,
) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, headers, json)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _, json) = send(app, req).await;
    (status, json)
}

/// Send a POST request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let (status, _, json) = send(app, req).await;
    (status, json)
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[tokio::test]
async fn first_tree_read_seeds_the_default_roadmap() {
    let (status, json) = get(open_app(), "/api/tree").await;
    assert_eq!(status, StatusCode::OK);
    let roots = json.as_array().unwrap();
    assert_eq!(roots.len(), 9);
    assert_eq!(roots[0]["id"], "1");
    assert_eq!(roots[0]["expanded"], true);
}

#[tokio::test]
async fn tree_edits_from_an_empty_forest() {
    let app = open_app();
    let (status, json) = post_json(app.clone(), "/api/tree", serde_json::json!({ "forest": [] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (_, json) = post_json(
        app.clone(),
        "/api/tree/ops",
        serde_json::json!({ "op": "add_root", "title": "Build API" }),
    )
    .await;
    assert_eq!(json["applied"], true);
    assert_eq!(json["id"], "1");
    assert_eq!(
        json["forest"],
        serde_json::json!([{ "id": "1", "title": "Build API", "done": false, "expanded": true, "children": [] }])
    );

    let (_, json) = post_json(
        app.clone(),
        "/api/tree/ops",
        serde_json::json!({ "op": "add_child", "parent_id": "1", "title": "Design schema" }),
    )
    .await;
    assert_eq!(json["id"], "1.1");
    assert_eq!(json["forest"][0]["expanded"], true);
    assert_eq!(json["forest"][0]["children"][0]["expanded"], false);

    let (_, json) = post_json(
        app.clone(),
        "/api/tree/ops",
        serde_json::json!({ "op": "toggle_done", "id": "1.1" }),
    )
    .await;
    assert_eq!(json["forest"][0]["children"][0]["done"], true);
    assert_eq!(json["forest"][0]["done"], false);

    let (_, json) = post_json(
        app.clone(),
        "/api/tree/ops",
        serde_json::json!({ "op": "remove", "id": "1" }),
    )
    .await;
    assert_eq!(json["applied"], true);
    assert_eq!(json["forest"], serde_json::json!([]));

    let (_, json) = get(app, "/api/tree").await;
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn unknown_node_edit_is_a_quiet_no_op() {
    let app = open_app();
    let (_, before) = get(app.clone(), "/api/tree").await;
    let (status, json) = post_json(
        app.clone(),
        "/api/tree/ops",
        serde_json::json!({ "op": "rename", "id": "42.7", "title": "Ghost" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["applied"], false);
    assert_eq!(json["forest"], before);
}

#[tokio::test]
async fn portuguese_tree_body_is_accepted() {
    let app = open_app();
    let (status, _) = post_json(
        app.clone(),
        "/api/tree",
        serde_json::json!({ "estrutura": [{
            "id": "1",
            "titulo": "Somente",
            "concluido": true,
            "expandido": false,
            "filhos": [{ "id": "1.1", "titulo": "Filho", "concluido": false, "filhos": [] }]
        }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, json) = get(app, "/api/tree").await;
    assert_eq!(json[0]["title"], "Somente");
    assert_eq!(json[0]["done"], true);
    assert_eq!(json[0]["children"][0]["title"], "Filho");
}

// ---------------------------------------------------------------------------
// Backlog and tracking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn backlog_add_then_complete() {
    let app = open_app();
    let (status, json) = post_json(
        app.clone(),
        "/api/backlog/add",
        serde_json::json!({ "feature": "Wishlist", "phase": "2.1", "priority": "high" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = json["id"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        app.clone(),
        "/api/backlog/update",
        serde_json::json!({ "id": id, "status": "done" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get(app, "/api/backlog").await;
    assert_eq!(json[0]["feature"], "Wishlist");
    assert_eq!(json[0]["priority"], "high");
    assert_eq!(json[0]["status"], "done");
    assert!(json[0]["completed_at"].is_string());
}

#[tokio::test]
async fn backlog_update_unknown_id_is_404() {
    let (status, json) = post_json(
        open_app(),
        "/api/backlog/update",
        serde_json::json!({ "id": "nope", "status": "done" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn backlog_add_rejects_blank_feature() {
    let (status, _) = post_json(
        open_app(),
        "/api/backlog/add",
        serde_json::json!({ "feature": "  ", "phase": "1.1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tracking_update_unknown_phase_is_400() {
    let app = open_app();
    let (status, _) = post_json(
        app.clone(),
        "/api/tracking/update",
        serde_json::json!({ "phase": "9.9", "name": "Cart", "status": "used" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        app.clone(),
        "/api/tracking/update",
        serde_json::json!({ "phase": "1.1", "name": "Cart", "status": "used" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get(app, "/api/tracking").await;
    assert_eq!(json["phases"]["1.1"]["items"][0]["name"], "Cart");
    assert_eq!(json["project"], "INDUSALES v5.0");
}

#[tokio::test]
async fn state_survives_a_file_backed_restart() {
    let dir = TempDir::new().unwrap();
    let app = build_router(AppState::new(
        dir.path().to_path_buf(),
        Config::default(),
        Secrets::default(),
    ));
    post_json(
        app,
        "/api/backlog/add",
        serde_json::json!({ "feature": "Coupons", "phase": "3.1" }),
    )
    .await;

    let doc = JsonFileStore::new(dir.path()).load().unwrap();
    assert_eq!(doc.backlog.len(), 1);
    assert_eq!(doc.backlog[0].feature, "Coupons");
}

// ---------------------------------------------------------------------------
// Prompt generation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn architect_returns_prompt_and_logs_phase_item() {
    let mut server = mockito::Server::new_async().await;
    let completion = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_body(r#"{"choices":[{"message":{"content":"  Create a /cart page with line items.  "}}]}"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.llm.api_base = server.url();
    let secrets = Secrets {
        openai_api_key: Some("sk-test".into()),
        ..Secrets::default()
    };
    let app = build_router(memory_state(config, secrets));

    let (status, json) = post_json(
        app.clone(),
        "/api/architect",
        serde_json::json!({ "feature": "Shopping cart", "phase": "1.2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prompt"], "Create a /cart page with line items.");
    assert_eq!(json["cost"], "1 credit");
    completion.assert_async().await;

    let (_, json) = get(app, "/api/tracking").await;
    let items = json["phases"]["1.2"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], "generated");
}

#[tokio::test]
async fn architect_upstream_failure_is_502() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let mut config = Config::default();
    config.llm.api_base = server.url();
    let app = build_router(memory_state(config, Secrets::default()));

    let (status, json) = post_json(
        app,
        "/api/architect",
        serde_json::json!({ "feature": "Cart", "phase": "1.2" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

fn guarded_app() -> axum::Router {
    let mut config = Config::default();
    config.auth.upsert_user("ana", "hunter2");
    let secrets = Secrets {
        session_secret: Some("test-secret".into()),
        ..Secrets::default()
    };
    build_router(memory_state(config, secrets))
}

fn login_request(password: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(format!("username=ana&password={password}")))
        .unwrap()
}

#[tokio::test]
async fn login_sets_a_cookie_that_opens_the_api() {
    let app = guarded_app();

    let (status, _) = get(app.clone(), "/api/whoami").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, headers, _) = send(app.clone(), login_request("hunter2")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers["location"], "/dashboard");
    let cookie = headers["set-cookie"].to_str().unwrap();
    let pair = cookie.split(';').next().unwrap().to_string();
    assert!(pair.starts_with("architect_session="));

    let req = axum::http::Request::builder()
        .uri("/api/whoami")
        .header("cookie", pair)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _, json) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"], "ana");
}

#[tokio::test]
async fn wrong_password_redirects_back_with_error() {
    let (status, headers, _) = send(guarded_app(), login_request("nope")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers["location"], "/login?error=1");
    assert!(headers.get("set-cookie").is_none());
}

#[tokio::test]
async fn login_page_is_public_and_dashboard_is_not() {
    let app = guarded_app();
    let (status, _) = get(app.clone(), "/login?error=1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);

    let req = axum::http::Request::builder()
        .uri("/dashboard")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, headers, _) = send(app, req).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers["location"], "/login");
}

#[tokio::test]
async fn open_dashboard_renders_html() {
    let req = axum::http::Request::builder()
        .uri("/dashboard")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = open_app().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("INDUSALES v5.0"));
    assert!(html.contains("anonymous"));
    assert!(html.contains("/api/tree/ops"));
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

fn webhook_request(event: &str, body: &str, signature: Option<String>) -> axum::http::Request<axum::body::Body> {
    let mut b = axum::http::Request::builder()
        .method("POST")
        .uri("/github-webhook")
        .header("x-github-event", event)
        .header("content-type", "application/json");
    if let Some(sig) = signature {
        b = b.header("x-hub-signature-256", sig);
    }
    b.body(axum::body::Body::from(body.to_string())).unwrap()
}

fn sign(secret: &str, body: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

fn webhook_app() -> axum::Router {
    let secrets = Secrets {
        webhook_secret: Some("hook".into()),
        ..Secrets::default()
    };
    build_router(memory_state(Config::default(), secrets))
}

#[tokio::test]
async fn webhook_rejects_bad_signature() {
    let body = r#"{"zen":"Keep it logically awesome."}"#;
    let (status, _, _) = send(webhook_app(), webhook_request("ping", body, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = sign("other", body);
    let (status, _, _) = send(webhook_app(), webhook_request("ping", body, Some(forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_acknowledges_without_queueing_when_reviews_are_off() {
    let body = r#"{"action":"opened","number":3,"pull_request":{"title":"Cart"}}"#;
    let req = webhook_request("pull_request", body, Some(sign("hook", body)));
    let (status, _, json) = send(webhook_app(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(json["queued"], false);
}

#[tokio::test]
async fn webhook_is_reachable_behind_auth() {
    let body = r#"{"zen":"hi"}"#;
    let (status, _, json) = send(guarded_app(), webhook_request("ping", body, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
}
