use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::auth::{RequireApiSession, RequireSession};
use crate::error::Error;
use crate::habits::{reorder, toggle_today};
use crate::server::AppState;
use crate::server::response::{ApiError, HOME, RecordId, StoreResultExt};

/// Shared by the canonical toggle route and its aliases.
pub async fn toggle_completion(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> impl IntoResponse {
    let today = Utc::now().date_naive();
    toggle_today(state.store.as_ref(), auth.email(), id, today).or_missing("Habit not found")?;

    Ok::<_, ApiError>(Redirect::to(HOME))
}

pub async fn reorder_habits(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected reorder body: {e}");
        ApiError::bad_request("Invalid JSON payload")
    })?;

    let updated = reorder(state.store.as_ref(), auth.email(), &payload).map_err(|e| match e {
        Error::InvalidPayload(message) => ApiError::bad_request(message),
        other => {
            tracing::error!("Failed to reorder habits: {other}");
            ApiError::internal("Failed to reorder habits")
        }
    })?;

    tracing::info!(count = updated.len(), "Reordered habits");

    Ok::<_, ApiError>(Json(json!({ "success": true, "updated": updated })))
}
