use architect_core::tree::{self, Node, OpOutcome, TreeOp};
use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/tree: current forest, seeded with the default roadmap on first read.
pub async fn get_tree(State(app): State<AppState>) -> Result<Json<Vec<Node>>, AppError> {
    let forest = app.write(|s| tree::load_forest(s)).await?;
    Ok(Json(forest))
}

#[derive(serde::Deserialize)]
pub struct ReplaceTreeBody {
    #[serde(alias = "estrutura")]
    pub forest: Vec<Node>,
}

/// POST /api/tree: replace the whole forest.
pub async fn replace_tree(
    State(app): State<AppState>,
    Json(body): Json<ReplaceTreeBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let count = body.forest.len();
    app.write(move |s| tree::save_forest(s, body.forest)).await?;
    tracing::debug!(roots = count, "tree replaced");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/tree/reset: back to the default roadmap.
pub async fn reset_tree(State(app): State<AppState>) -> Result<Json<Vec<Node>>, AppError> {
    let forest = app.write(|s| tree::reset_forest(s)).await?;
    tracing::info!("tree reset to default roadmap");
    Ok(Json(forest))
}

#[derive(serde::Serialize)]
pub struct OpResponse {
    #[serde(flatten)]
    pub outcome: OpOutcome,
    pub forest: Vec<Node>,
}

/// POST /api/tree/ops, one edit per call, e.g. `{"op": "add_child", "parent_id": "1", "title": "…"}`.
pub async fn apply_op(
    State(app): State<AppState>,
    Json(op): Json<TreeOp>,
) -> Result<Json<OpResponse>, AppError> {
    let (outcome, forest) = app.write(move |s| tree::apply_op(s, &op)).await?;
    Ok(Json(OpResponse { outcome, forest }))
}
