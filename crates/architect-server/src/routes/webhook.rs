use architect_core::review::ReviewTarget;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::AppError;
use crate::reviewer;
use crate::state::AppState;

const EVENT_HEADER: &str = "x-github-event";
const SIGNATURE_HEADER: &str = "x-hub-signature-256";
const REVIEWED_ACTIONS: &[&str] = &["opened", "synchronize", "reopened"];

// ---------------------------------------------------------------------------
// Payloads (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PullRequestEvent {
    action: String,
    number: u64,
    pull_request: PullRequestPayload,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
struct PushEvent {
    #[serde(default)]
    deleted: bool,
    head_commit: Option<HeadCommit>,
}

#[derive(Deserialize)]
struct HeadCommit {
    id: String,
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// Check `sha256=<hex>` against the HMAC of `body`.
pub fn verify_signature(secret: &str, body: &[u8], header: Option<&str>) -> bool {
    let Some(sig) = header
        .and_then(|h| h.strip_prefix("sha256="))
        .and_then(|hex_sig| hex::decode(hex_sig).ok())
    else {
        return false;
    };
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&sig).is_ok()
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Which review, if any, an event asks for.
fn review_request(event: &str, body: &[u8]) -> Result<Option<(ReviewTarget, String)>, serde_json::Error> {
    match event {
        "pull_request" => {
            let ev: PullRequestEvent = serde_json::from_slice(body)?;
            if !REVIEWED_ACTIONS.contains(&ev.action.as_str()) {
                return Ok(None);
            }
            Ok(Some((ReviewTarget::PullRequest(ev.number), ev.pull_request.title)))
        }
        "push" => {
            let ev: PushEvent = serde_json::from_slice(body)?;
            if ev.deleted {
                return Ok(None);
            }
            Ok(ev
                .head_commit
                .map(|c| (ReviewTarget::Commit(c.id), c.message)))
        }
        _ => Ok(None),
    }
}

/// POST /github-webhook: acknowledge at once, review in the background.
pub async fn github_webhook(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    if let Some(secret) = &app.webhook_secret {
        let header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
        if !verify_signature(secret, &body, header) {
            tracing::warn!("webhook signature mismatch");
            let body = serde_json::json!({ "error": "invalid signature" });
            return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
        }
    }

    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let request = review_request(event, &body)
        .map_err(|e| AppError::bad_request(format!("malformed {event} payload: {e}")))?;

    let queued = match request {
        Some((target, title)) if app.config.review.enabled => {
            tracing::info!(event, subject = %target, "review queued");
            reviewer::spawn_review(
                app.github.clone(),
                app.llm.clone(),
                app.config.clone(),
                target,
                title,
            );
            true
        }
        Some((target, _)) => {
            tracing::debug!(event, subject = %target, "reviews disabled; ignoring");
            false
        }
        None => false,
    };

    Ok(Json(serde_json::json!({ "ok": true, "queued": queued })).into_response())
}
