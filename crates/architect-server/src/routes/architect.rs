use architect_core::prompt::{PromptRequest, PromptResponse};
use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::generator;
use crate::state::AppState;

/// POST /api/architect: generate a builder prompt for a feature.
pub async fn generate_prompt(
    State(app): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    Ok(Json(generator::generate(&app, req).await?))
}
