use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use super::helpers::{SessionValidationError, extract_token_from_header, validate_session};
use crate::server::AppState;
use crate::types::Session;

/// Identity of a signed-in caller, for routes answering with redirects.
/// Unauthenticated requests are sent to `/signin`.
pub struct RequireSession(pub Session);

/// Identity of a signed-in caller, for JSON routes.
/// Unauthenticated requests get a 401 JSON body.
pub struct RequireApiSession(pub Session);

impl RequireSession {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.user_email
    }
}

impl RequireApiSession {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.user_email
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    SessionExpired,
    InternalError,
}

impl AuthError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidScheme => (StatusCode::UNAUTHORIZED, "Invalid authorization scheme"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid session"),
            AuthError::SessionExpired => (StatusCode::UNAUTHORIZED, "Session expired"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<SessionValidationError> for AuthError {
    fn from(e: SessionValidationError) -> Self {
        match e {
            SessionValidationError::InvalidScheme => AuthError::InvalidScheme,
            SessionValidationError::InvalidToken => AuthError::InvalidToken,
            SessionValidationError::SessionExpired => AuthError::SessionExpired,
            SessionValidationError::InternalError => AuthError::InternalError,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = json!({ "success": false, "error": message });

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                "WWW-Authenticate",
                axum::http::HeaderValue::from_static("Bearer realm=\"habitual\""),
            );
        }

        response
    }
}

/// Rejection of [`RequireSession`]: a redirect to the sign-in page, or the
/// plain error when the failure was on our side.
pub struct SignInRedirect(AuthError);

impl IntoResponse for SignInRedirect {
    fn into_response(self) -> Response {
        match self.0 {
            AuthError::InternalError => self.0.into_response(),
            _ => Redirect::to("/signin").into_response(),
        }
    }
}

impl FromRequestParts<Arc<AppState>> for RequireSession {
    type Rejection = SignInRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = extract_and_validate_session(parts, state).map_err(SignInRedirect)?;
        Ok(RequireSession(session))
    }
}

impl FromRequestParts<Arc<AppState>> for RequireApiSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = extract_and_validate_session(parts, state)?;
        Ok(RequireApiSession(session))
    }
}

fn extract_and_validate_session(
    parts: &Parts,
    state: &Arc<AppState>,
) -> Result<Session, AuthError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let raw_token = extract_token_from_header(auth_header)?.ok_or(AuthError::MissingAuth)?;

    Ok(validate_session(state, &raw_token)?)
}
