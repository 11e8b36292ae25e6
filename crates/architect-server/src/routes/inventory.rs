use architect_core::inventory::Inventory;
use architect_core::store::DocumentStore;
use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::error::AppError;
use crate::state::AppState;

/// Fetch from GitHub and store the result. The fetch runs outside the write
/// lock; only the final save is serialised.
pub async fn refresh(app: &AppState) -> Result<Inventory, AppError> {
    let inventory = app.github.fetch_inventory().await?;
    let stored = inventory.clone();
    app.write(move |s| {
        let mut doc = s.load()?;
        doc.inventory = stored;
        s.save(&doc)
    })
    .await?;
    Ok(inventory)
}

/// GET /api/inventory: cached snapshot, refreshed first when older than an
/// hour. A failed refresh falls back to the cache.
pub async fn get_inventory(State(app): State<AppState>) -> Result<Json<Inventory>, AppError> {
    let cached = app.read(|s| Ok(s.load()?.inventory)).await?;
    if !cached.is_stale(Utc::now()) {
        return Ok(Json(cached));
    }
    match refresh(&app).await {
        Ok(fresh) => Ok(Json(fresh)),
        Err(e) => {
            tracing::warn!(error = %e.0, "inventory refresh failed; serving cached copy");
            Ok(Json(cached))
        }
    }
}

/// POST /api/inventory/refresh: always hits GitHub; 502 when it fails.
pub async fn refresh_inventory(State(app): State<AppState>) -> Result<Json<Inventory>, AppError> {
    Ok(Json(refresh(&app).await?))
}
