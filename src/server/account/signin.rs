use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::auth::{RequireSession, open_session};
use crate::server::AppState;
use crate::server::dto::SignInRequest;
use crate::server::response::{ApiError, StoreResultExt};
use crate::server::validation::validate_email;

/// Without an `action`, issues a one-time code for `email`.
/// With `action: "verify"`, trades a matching code for a session token.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> impl IntoResponse {
    let email = validate_email(&req.email)?;

    match req.action.as_deref() {
        None => {
            let code = state.otp.issue(&email);
            tracing::info!("Sign-in code for {email}: {code}");

            let mut body = json!({
                "success": true,
                "message": format!("OTP sent to {email}"),
            });
            if state.config.expose_otp {
                body["otp"] = json!(code);
            }
            Ok::<_, ApiError>((StatusCode::OK, Json(body)))
        }
        Some("verify") => {
            let code = req.otp.unwrap_or_default();
            if !state.otp.verify(&email, &code) {
                tracing::info!("Rejected sign-in code for {email}");
                return Ok((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "success": false, "message": "Invalid OTP" })),
                ));
            }

            let token = open_session(&state, &email).api_err("Failed to open session")?;
            Ok((
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Authentication successful",
                    "token": token,
                })),
            ))
        }
        Some(other) => Err(ApiError::bad_request(format!("Unknown action: {other}"))),
    }
}

pub async fn logout(auth: RequireSession, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state
        .store
        .delete_session(&auth.0.id)
        .api_err("Failed to end session")?;

    tracing::info!(session_id = %auth.0.id, "Closed session");

    Ok::<_, ApiError>(Redirect::to("/signin"))
}
