mod account;
pub mod dto;
mod habits;
pub mod response;
mod router;
pub mod validation;

pub use account::account_router;
pub use habits::habits_router;
pub use router::{AppState, create_router, spawn_cleanup_task};
