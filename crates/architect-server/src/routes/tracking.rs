use architect_core::document::TrackingDocument;
use architect_core::phase;
use architect_core::store::DocumentStore;
use architect_core::types::PhaseItemStatus;
use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/tracking: the whole document.
pub async fn get_tracking(State(app): State<AppState>) -> Result<Json<TrackingDocument>, AppError> {
    let doc = app.read(|s| s.load()).await?;
    Ok(Json(doc))
}

#[derive(serde::Deserialize)]
pub struct PhaseItemBody {
    pub phase: String,
    pub name: String,
    pub status: PhaseItemStatus,
}

/// POST /api/tracking/update: append to a phase's log. 400 on unknown phase.
pub async fn record_phase_item(
    State(app): State<AppState>,
    Json(body): Json<PhaseItemBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    app.write(move |s| {
        let mut doc = s.load()?;
        phase::record_item(&mut doc.phases, &body.phase, body.name.trim(), body.status)?;
        s.save(&doc)
    })
    .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
