use std::sync::Arc;

use architect_core::config::AuthConfig;
use axum::{
    body::Body,
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "architect_session";

/// Username attached to every request that passed the gate.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub String);

const ANONYMOUS: &str = "anonymous";

// ---------------------------------------------------------------------------
// AuthGate
// ---------------------------------------------------------------------------

/// Signs and checks session cookies for the configured users.
///
/// With no users configured the gate is open and every request runs as
/// `anonymous`.
pub struct AuthGate {
    key: Vec<u8>,
    config: AuthConfig,
}

impl AuthGate {
    /// `secret` keys the session signature. Without one a random key is drawn,
    /// so sessions do not survive a restart.
    pub fn new(config: AuthConfig, secret: Option<&str>) -> Self {
        let key = match secret.filter(|s| !s.is_empty()) {
            Some(s) => s.as_bytes().to_vec(),
            None => rand::thread_rng().gen::<[u8; 32]>().to_vec(),
        };
        Self { key, config }
    }

    pub fn enabled(&self) -> bool {
        !self.config.users.is_empty()
    }

    pub fn check_password(&self, username: &str, password: &str) -> bool {
        self.config.check(username, password)
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC accepts keys of any length.
        HmacSha256::new_from_slice(&self.key).unwrap_or_else(|_| unreachable!())
    }

    fn session_ms(&self) -> i64 {
        i64::from(self.config.session_hours) * 3_600_000
    }

    /// `base64url(user:expiry_ms) "." base64url(hmac)`
    pub fn issue(&self, username: &str, now_ms: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!("{username}:{}", now_ms + self.session_ms()));
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let sig = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{payload}.{sig}")
    }

    /// Username of a valid, unexpired token for a user that still exists.
    pub fn verify(&self, token: &str, now_ms: i64) -> Option<String> {
        let (payload, sig) = token.split_once('.')?;
        let sig = URL_SAFE_NO_PAD.decode(sig).ok()?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&sig).ok()?;

        let decoded = String::from_utf8(URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
        let (username, expiry) = decoded.rsplit_once(':')?;
        let expiry: i64 = expiry.parse().ok()?;
        if expiry <= now_ms || !self.config.has_user(username) {
            return None;
        }
        Some(username.to_string())
    }

    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
            self.session_ms() / 1000
        );
        if self.config.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn clear_cookie(&self) -> String {
        format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn session_token(req: &Request) -> Option<&str> {
    let cookies = req.headers().get("cookie")?.to_str().ok()?;
    cookies
        .split(';')
        .find_map(|part| part.trim().strip_prefix(&format!("{SESSION_COOKIE}=")))
}

/// Only the API and the dashboard need a session.
fn is_guarded(path: &str) -> bool {
    path.starts_with("/api/") || path == "/dashboard"
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

/// Session gate.
///
/// 1. No users configured → passthrough as `anonymous`
/// 2. Valid session cookie → passthrough as that user
/// 3. Unguarded path (`/login`, `/logout`, `/github-webhook`, `/healthz`, `/`) → passthrough
/// 4. Otherwise → 401 JSON for `/api/*`, 303 to `/login` for pages
pub async fn auth_middleware(
    State(gate): State<Arc<AuthGate>>,
    mut req: Request,
    next: Next,
) -> Response {
    if !gate.enabled() {
        req.extensions_mut().insert(CurrentUser(ANONYMOUS.to_string()));
        return next.run(req).await;
    }

    if let Some(user) = session_token(&req).and_then(|t| gate.verify(t, now_ms())) {
        req.extensions_mut().insert(CurrentUser(user));
        return next.run(req).await;
    }

    let path = req.uri().path();
    if !is_guarded(path) {
        return next.run(req).await;
    }

    if path.starts_with("/api/") {
        Response::builder()
            .status(401)
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"error":"unauthorized"}"#))
            .unwrap_or_default()
    } else {
        Redirect::to("/login").into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /login: check credentials, set the session cookie.
pub async fn login(State(app): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let username = form.username.trim();
    if !app.auth.check_password(username, &form.password) {
        tracing::warn!(username, "login rejected");
        return Redirect::to("/login?error=1").into_response();
    }
    tracing::info!(username, "login");
    let token = app.auth.issue(username, now_ms());
    (
        [(SET_COOKIE, app.auth.session_cookie(&token))],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

/// GET /logout: drop the session cookie.
pub async fn logout(State(app): State<AppState>) -> Response {
    (
        [(SET_COOKIE, app.auth.clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

/// GET /api/whoami
pub async fn whoami(Extension(user): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK", "user": user.0 }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
