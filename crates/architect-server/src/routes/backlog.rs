use architect_core::backlog::{self, BacklogItem};
use architect_core::store::DocumentStore;
use architect_core::types::{BacklogStatus, Priority};
use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/backlog: every item, in insertion order.
pub async fn list_backlog(State(app): State<AppState>) -> Result<Json<Vec<BacklogItem>>, AppError> {
    let items = app.read(|s| Ok(s.load()?.backlog)).await?;
    Ok(Json(items))
}

#[derive(serde::Deserialize)]
pub struct AddBacklogBody {
    pub feature: String,
    pub phase: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /api/backlog/add
pub async fn add_backlog(
    State(app): State<AppState>,
    Json(body): Json<AddBacklogBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let feature = body.feature.trim().to_string();
    if feature.is_empty() {
        return Err(AppError::bad_request("feature must not be empty"));
    }
    let mut item = BacklogItem::new(feature, body.phase.trim());
    item.priority = body.priority.unwrap_or_default();
    item.description = body.description.unwrap_or_default();

    let id = app
        .write(move |s| {
            let mut doc = s.load()?;
            let id = backlog::add_item(&mut doc.backlog, item);
            s.save(&doc)?;
            Ok(id)
        })
        .await?;

    Ok(Json(serde_json::json!({ "success": true, "id": id })))
}

#[derive(serde::Deserialize)]
pub struct UpdateBacklogBody {
    pub id: String,
    pub status: BacklogStatus,
}

/// POST /api/backlog/update: 404 when the id is unknown.
pub async fn update_backlog(
    State(app): State<AppState>,
    Json(body): Json<UpdateBacklogBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    app.write(move |s| {
        let mut doc = s.load()?;
        backlog::update_status(&mut doc.backlog, &body.id, body.status)?;
        s.save(&doc)
    })
    .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
