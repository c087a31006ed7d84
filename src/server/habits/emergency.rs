use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::auth::RequireApiSession;
use crate::habits::emergency::{self, DEFAULT_DURATION_DAYS, PauseStatus};
use crate::server::AppState;
use crate::server::dto::{EmergencyPauseRequest, EmergencyStatusResponse};
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::validate_pause_duration;

pub async fn activate_pause(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmergencyPauseRequest>,
) -> impl IntoResponse {
    let days = validate_pause_duration(req.duration_days.unwrap_or(DEFAULT_DURATION_DAYS))?;

    let activated = emergency::activate(
        state.store.as_ref(),
        auth.email(),
        req.reason.as_deref(),
        days,
        Utc::now(),
    )?;

    Ok::<_, ApiError>(Json(json!({
        "success": true,
        "message": format!(
            "Emergency pause activated for {days} days. All {} habits paused.",
            activated.habits_paused
        ),
        "ends_at": activated.pause.ends_at,
        "habits_paused": activated.habits_paused,
    })))
}

pub async fn end_pause(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let resumed = emergency::resume(state.store.as_ref(), auth.email(), Utc::now())
        .or_missing("No active emergency pause found")?;

    Ok::<_, ApiError>(Json(json!({
        "success": true,
        "message": format!("Emergency pause ended. Welcome back! {resumed} habits resumed."),
        "habits_resumed": resumed,
    })))
}

pub async fn pause_status(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let now = Utc::now();
    let status = emergency::status(state.store.as_ref(), auth.email(), now)
        .api_err("Failed to load emergency pause")?;

    let response = match status {
        PauseStatus::Inactive { auto_resumed } => EmergencyStatusResponse {
            is_paused: false,
            auto_resumed,
            reason: None,
            duration_days: None,
            started_at: None,
            ends_at: None,
            days_remaining: None,
        },
        PauseStatus::Active(pause) => EmergencyStatusResponse {
            is_paused: true,
            auto_resumed: false,
            days_remaining: Some((pause.ends_at - now).num_days()),
            reason: Some(pause.reason),
            duration_days: Some(pause.duration_days),
            started_at: Some(pause.started_at),
            ends_at: Some(pause.ends_at),
        },
    };

    Ok::<_, ApiError>(Json(response))
}
