//! The habit core. Mutations (toggles, reorder, status changes, emergency
//! pauses) go through the store; statistics and CSV export are pure views.

pub mod completion;
pub mod emergency;
pub mod export;
pub mod lifecycle;
pub mod listing;
pub mod ordering;
pub mod stats;

pub use completion::{CompletionLog, ToggleOutcome, toggle_today};
pub use export::{export_filename, habits_csv};
pub use lifecycle::{create_habit, delete_habit, rename_habit, set_status};
pub use listing::{
    ListQuery, SortKey, available_categories, compose_active, compose_archived,
    compose_completed, compose_paused,
};
pub use ordering::reorder;
pub use stats::{HabitStats, compute as compute_stats};
