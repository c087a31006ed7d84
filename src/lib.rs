//! # Habitual
//!
//! A self-hostable habit tracker, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! habitual = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use habitual::config::ServerConfig;
//! use habitual::server::{AppState, create_router};
//! use habitual::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `habitual` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod habits;
pub mod quiz;
pub mod server;
pub mod store;
pub mod types;
