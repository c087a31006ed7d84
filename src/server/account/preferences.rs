use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde_json::json;

use crate::auth::{RequireApiSession, RequireSession};
use crate::server::AppState;
use crate::server::dto::ThemeRequest;
use crate::server::response::{ApiError, HOME, StoreResultExt, redirect_back};
use crate::store::Store;
use crate::types::{Theme, UserPreferences};

/// Stored preferences, or the defaults when the user never saved any.
pub(super) fn load_preferences(
    store: &dyn Store,
    email: &str,
) -> Result<UserPreferences, ApiError> {
    Ok(store
        .get_preferences(email)
        .api_err("Failed to load preferences")?
        .unwrap_or_else(|| UserPreferences::defaults_for(email)))
}

pub(super) fn save(
    store: &dyn Store,
    mut prefs: UserPreferences,
) -> Result<UserPreferences, ApiError> {
    prefs.updated_at = Utc::now();
    store
        .upsert_preferences(&prefs)
        .api_err("Failed to save preferences")?;
    Ok(prefs)
}

/// Sets the theme, or flips it when none is given.
pub async fn toggle_theme(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<ThemeRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let mut prefs = load_preferences(store, auth.email())?;

    prefs.theme = match req.theme.as_deref() {
        Some(raw) => raw.parse::<Theme>().map_err(ApiError::bad_request)?,
        None => match prefs.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        },
    };
    let prefs = save(store, prefs)?;

    Ok::<_, ApiError>(Json(json!({ "success": true, "theme": prefs.theme })))
}

pub async fn theme_settings(
    auth: RequireApiSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let prefs = load_preferences(state.store.as_ref(), auth.email())?;

    Ok::<_, ApiError>(Json(json!({ "theme": prefs.theme })))
}

pub async fn disable_tips(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    let store = state.store.as_ref();
    let mut prefs = load_preferences(store, auth.email())?;
    prefs.has_seen_tutorial = true;
    save(store, prefs)?;

    Ok(redirect_back(&headers, HOME))
}

pub async fn tips(auth: RequireSession, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let prefs = load_preferences(state.store.as_ref(), auth.email())?;

    Ok::<_, ApiError>(Json(json!({ "show_tips": !prefs.has_seen_tutorial })))
}
