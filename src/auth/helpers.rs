use std::sync::Arc;

use chrono::{Duration, Utc};

use super::parse_token;
use crate::error::{Error, Result};
use crate::server::AppState;
use crate::types::Session;

#[derive(Debug)]
pub enum SessionValidationError {
    InvalidScheme,
    InvalidToken,
    SessionExpired,
    InternalError,
}

/// Validates a raw session token against the store and records its use.
pub fn validate_session(
    state: &Arc<AppState>,
    raw_token: &str,
) -> std::result::Result<Session, SessionValidationError> {
    let (lookup, _secret) =
        parse_token(raw_token).map_err(|_| SessionValidationError::InvalidToken)?;

    let session = state
        .store
        .get_session_by_lookup(&lookup)
        .map_err(|_| SessionValidationError::InternalError)?
        .ok_or(SessionValidationError::InvalidToken)?;

    if !state
        .tokens
        .verify(raw_token, &session.token_hash)
        .map_err(|_| SessionValidationError::InternalError)?
    {
        return Err(SessionValidationError::InvalidToken);
    }

    if session.expires_at < Utc::now() {
        return Err(SessionValidationError::SessionExpired);
    }

    if let Err(e) = state.store.touch_session(&session.id) {
        tracing::warn!("Failed to update session last_used_at: {e}");
    }

    Ok(session)
}

/// Extracts a bearer token from the Authorization header.
/// Returns `Ok(None)` when the header is absent.
pub fn extract_token_from_header(
    auth_header: Option<&str>,
) -> std::result::Result<Option<String>, SessionValidationError> {
    match auth_header {
        Some(header) => header
            .strip_prefix("Bearer ")
            .map(|token| Some(token.trim().to_string()))
            .ok_or(SessionValidationError::InvalidScheme),
        None => Ok(None),
    }
}

/// Persists a new session for `email` and returns the raw token.
pub fn open_session(state: &AppState, email: &str) -> Result<String> {
    let now = Utc::now();

    // Lookups are 8 hex chars; retry the rare collision once.
    for _ in 0..2 {
        let issued = state.tokens.generate()?;
        let session = Session {
            id: uuid::Uuid::new_v4().to_string(),
            token_hash: issued.hash,
            token_lookup: issued.lookup,
            user_email: email.to_string(),
            created_at: now,
            expires_at: now + Duration::hours(state.config.session_ttl_hours),
            last_used_at: None,
        };

        match state.store.create_session(&session) {
            Ok(()) => {
                tracing::info!(session_id = %session.id, "Opened session");
                return Ok(issued.raw);
            }
            Err(Error::TokenLookupCollision) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(Error::TokenLookupCollision)
}
