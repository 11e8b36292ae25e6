pub mod auth;
pub mod error;
pub mod generator;
pub mod github;
pub mod reviewer;
pub mod routes;
pub mod state;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::{AppState, Secrets};

/// Build the axum Router with every page, API route and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let gate = app_state.auth.clone();

    Router::new()
        // Session
        .route("/login", get(routes::pages::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/api/whoami", get(auth::whoami))
        // Pages
        .route("/", get(routes::pages::index))
        .route("/dashboard", get(routes::pages::dashboard))
        .route("/healthz", get(routes::healthz))
        // Backlog
        .route("/api/backlog", get(routes::backlog::list_backlog))
        .route("/api/backlog/add", post(routes::backlog::add_backlog))
        .route("/api/backlog/update", post(routes::backlog::update_backlog))
        // Tracking
        .route("/api/tracking", get(routes::tracking::get_tracking))
        .route(
            "/api/tracking/update",
            post(routes::tracking::record_phase_item),
        )
        // Prompt generation
        .route("/api/architect", post(routes::architect::generate_prompt))
        // Inventory
        .route("/api/inventory", get(routes::inventory::get_inventory))
        .route(
            "/api/inventory/refresh",
            post(routes::inventory::refresh_inventory),
        )
        // Roadmap tree
        .route(
            "/api/tree",
            get(routes::tree::get_tree).post(routes::tree::replace_tree),
        )
        .route("/api/tree/reset", post(routes::tree::reset_tree))
        .route("/api/tree/ops", post(routes::tree::apply_op))
        // GitHub
        .route("/github-webhook", post(routes::webhook::github_webhook))
        .layer(middleware::from_fn_with_state(gate, auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the dashboard server on `0.0.0.0:<port>`.
pub async fn serve(app_state: AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener, open_browser).await
}

/// Start the dashboard server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let root = app_state.root.display().to_string();
    let app = build_router(app_state);

    tracing::info!(root, "architect dashboard listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/dashboard");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
