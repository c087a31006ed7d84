mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::habits::CompletionLog;
use crate::quiz::Personality;
use crate::types::*;

/// Store defines the database interface.
///
/// Every habit operation is scoped to an owner; a habit belonging to someone
/// else behaves exactly like a missing one. Mutations that carry a
/// [`HabitEvent`] record the notification in the same transaction.
pub trait Store: Send + Sync {
    /// Creates the schema and seeds the template catalogues. Idempotent.
    fn initialize(&self) -> Result<()>;

    // Habit operations
    fn create_habit(&self, habit: &NewHabit, event: Option<&HabitEvent>) -> Result<Habit>;
    fn get_habit(&self, owner: &str, id: i64) -> Result<Option<Habit>>;
    fn list_habits(&self, owner: &str) -> Result<Vec<Habit>>;
    fn list_habit_ids(&self, owner: &str) -> Result<Vec<i64>>;
    fn habit_name_exists(&self, owner: &str, name: &str) -> Result<bool>;
    fn update_habit(&self, habit: &Habit, event: Option<&HabitEvent>) -> Result<()>;
    fn update_completed_dates(&self, owner: &str, id: i64, log: &CompletionLog) -> Result<()>;
    fn delete_habit(&self, owner: &str, id: i64, event: Option<&HabitEvent>) -> Result<bool>;
    /// Writes `(habit_id, position)` pairs atomically.
    fn set_positions(&self, owner: &str, positions: &[(i64, i64)]) -> Result<()>;

    // Notification operations
    fn list_notifications(&self, email: &str) -> Result<Vec<Notification>>;
    fn count_unread_notifications(&self, email: &str) -> Result<i64>;
    fn mark_notification_read(&self, email: &str, id: i64) -> Result<bool>;
    fn mark_all_notifications_read(&self, email: &str) -> Result<usize>;

    // Preference operations
    fn get_preferences(&self, email: &str) -> Result<Option<UserPreferences>>;
    fn upsert_preferences(&self, prefs: &UserPreferences) -> Result<()>;

    // Session operations
    fn create_session(&self, session: &Session) -> Result<()>;
    fn get_session_by_lookup(&self, lookup: &str) -> Result<Option<Session>>;
    fn touch_session(&self, id: &str) -> Result<()>;
    fn delete_session(&self, id: &str) -> Result<bool>;
    fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize>;

    // Template operations
    /// General templates when `personality` is `None`.
    fn list_templates(&self, personality: Option<Personality>) -> Result<Vec<HabitTemplate>>;
    fn get_template(&self, id: i64) -> Result<Option<HabitTemplate>>;

    // Quiz operations
    fn upsert_quiz_result(&self, result: &QuizResult) -> Result<()>;
    fn get_quiz_result(&self, email: &str) -> Result<Option<QuizResult>>;

    // Emergency pause operations
    fn get_active_emergency_pause(&self, email: &str) -> Result<Option<EmergencyPause>>;
    /// Records a new pause and stamps `paused_at = started_at` on `habit_ids`.
    fn start_emergency_pause(
        &self,
        pause: &EmergencyPause,
        habit_ids: &[i64],
    ) -> Result<EmergencyPause>;
    /// Deactivates a pause and clears `paused_at` on `habit_ids`.
    fn end_emergency_pause(
        &self,
        email: &str,
        pause_id: i64,
        ended_at: DateTime<Utc>,
        habit_ids: &[i64],
    ) -> Result<()>;
}
