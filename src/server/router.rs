use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use chrono::Utc;

use super::account::account_router;
use super::habits::habits_router;
use crate::auth::{OtpCache, TokenGenerator};
use crate::config::ServerConfig;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: ServerConfig,
    /// Pending one-time sign-in codes.
    pub otp: OtpCache,
    pub tokens: TokenGenerator,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        Self {
            otp: OtpCache::new(config.otp_ttl()),
            tokens: TokenGenerator::new(),
            store,
            config,
        }
    }
}

/// Periodically drops expired sign-in codes and sessions.
pub fn spawn_cleanup_task(
    state: Arc<AppState>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            let codes = state.otp.purge_expired();
            match state.store.delete_expired_sessions(Utc::now()) {
                Ok(sessions) => {
                    tracing::debug!(codes, sessions, "Removed expired credentials");
                }
                Err(e) => tracing::warn!("Failed to remove expired sessions: {e}"),
            }
        }
    })
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(account_router())
        .merge(habits_router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
