mod notifications;
mod preferences;
mod signin;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn account_router() -> Router<Arc<AppState>> {
    Router::new()
        // Sessions
        .route("/signin", post(signin::sign_in))
        .route("/logout", post(signin::logout))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/{id}/read", post(notifications::mark_read))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route(
            "/notifications/toggle",
            post(notifications::toggle_notifications),
        )
        .route(
            "/notifications/settings",
            get(notifications::notification_settings),
        )
        // Preferences
        .route("/theme/toggle", post(preferences::toggle_theme))
        .route("/theme/settings", get(preferences::theme_settings))
        .route("/tips", get(preferences::tips))
        .route("/tips/disable", post(preferences::disable_tips))
}
