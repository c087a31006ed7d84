use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use chrono::Utc;

use crate::auth::RequireSession;
use crate::habits::{compute_stats, export_filename, habits_csv};
use crate::server::AppState;
use crate::server::response::{ApiError, StoreResultExt};

pub async fn stats(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let habits = state
        .store
        .list_habits(auth.email())
        .api_err("Failed to load statistics")?;

    Ok::<_, ApiError>(Json(compute_stats(&habits)))
}

pub async fn export_csv(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let habits = state
        .store
        .list_habits(auth.email())
        .api_err("Failed to export habits")?;

    let body = habits_csv(&habits);
    let disposition = format!("attachment; filename=\"{}\"", export_filename(Utc::now()));

    Ok::<_, ApiError>((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
