use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use super::preferences::{load_preferences, save};
use crate::auth::RequireSession;
use crate::server::AppState;
use crate::server::response::{ApiError, RecordId, StoreResultExt};

pub async fn list_notifications(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let notifications = store
        .list_notifications(auth.email())
        .api_err("Failed to list notifications")?;
    let unread_count = store
        .count_unread_notifications(auth.email())
        .api_err("Failed to count notifications")?;

    Ok::<_, ApiError>(Json(json!({
        "notifications": notifications,
        "unread_count": unread_count,
    })))
}

/// Unknown ids and other users' notifications are ignored.
pub async fn mark_read(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> impl IntoResponse {
    state
        .store
        .mark_notification_read(auth.email(), id)
        .api_err("Failed to update notification")?;

    Ok::<_, ApiError>(Json(json!({ "success": true })))
}

pub async fn mark_all_read(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let count = state
        .store
        .mark_all_notifications_read(auth.email())
        .api_err("Failed to update notifications")?;

    tracing::debug!(count, "Marked notifications read");

    Ok::<_, ApiError>(Json(json!({ "success": true })))
}

pub async fn toggle_notifications(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let mut prefs = load_preferences(store, auth.email())?;
    prefs.notifications_enabled = !prefs.notifications_enabled;
    let prefs = save(store, prefs)?;

    Ok::<_, ApiError>(Json(json!({
        "success": true,
        "notifications_enabled": prefs.notifications_enabled,
    })))
}

pub async fn notification_settings(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let prefs = load_preferences(state.store.as_ref(), auth.email())?;

    Ok::<_, ApiError>(Json(json!({
        "notifications_enabled": prefs.notifications_enabled,
    })))
}
