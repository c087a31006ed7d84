//! Emergency pause: pause every active habit at once, and undo it later.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{EmergencyPause, Habit};

pub const DEFAULT_DURATION_DAYS: i64 = 7;

/// Habits paused within this many seconds of the pause start are resumed with it.
const RESUME_WINDOW_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct Activated {
    pub pause: EmergencyPause,
    pub habits_paused: usize,
}

#[derive(Debug, Clone)]
pub enum PauseStatus {
    Inactive { auto_resumed: bool },
    Active(EmergencyPause),
}

/// Habits an emergency pause would put on hold: neither paused nor archived.
fn pausable(habits: &[Habit]) -> Vec<i64> {
    habits
        .iter()
        .filter(|h| !h.is_paused() && !h.is_archived())
        .map(|h| h.id)
        .collect()
}

/// Habits whose pause stamp belongs to the emergency pause started at `started_at`.
fn paused_by(habits: &[Habit], started_at: DateTime<Utc>) -> Vec<i64> {
    let window = Duration::seconds(RESUME_WINDOW_SECS);
    habits
        .iter()
        .filter(|h| {
            h.paused_at
                .is_some_and(|paused_at| (paused_at - started_at).abs() < window)
        })
        .map(|h| h.id)
        .collect()
}

pub fn activate(
    store: &dyn Store,
    email: &str,
    reason: Option<&str>,
    duration_days: i64,
    now: DateTime<Utc>,
) -> Result<Activated> {
    if store.get_active_emergency_pause(email)?.is_some() {
        return Err(Error::BadRequest("Emergency pause already active".to_string()));
    }

    let habits = store.list_habits(email)?;
    let to_pause = pausable(&habits);

    let pause = EmergencyPause {
        id: 0,
        user_email: email.to_string(),
        reason: reason.unwrap_or_default().trim().to_string(),
        duration_days,
        started_at: now,
        ends_at: now + Duration::days(duration_days),
        ended_at: None,
        is_active: true,
    };
    let pause = store.start_emergency_pause(&pause, &to_pause)?;

    tracing::info!(
        pause_id = pause.id,
        habits_paused = to_pause.len(),
        "Emergency pause activated"
    );

    Ok(Activated {
        pause,
        habits_paused: to_pause.len(),
    })
}

/// Ends the active pause and returns how many habits were resumed.
pub fn resume(store: &dyn Store, email: &str, now: DateTime<Utc>) -> Result<usize> {
    let pause = store
        .get_active_emergency_pause(email)?
        .ok_or(Error::NotFound)?;

    let habits = store.list_habits(email)?;
    let to_resume = paused_by(&habits, pause.started_at);

    store.end_emergency_pause(email, pause.id, now, &to_resume)?;
    tracing::info!(pause_id = pause.id, habits_resumed = to_resume.len(), "Emergency pause ended");

    Ok(to_resume.len())
}

/// Reports the active pause, ending it first if it has run its course.
/// Habits stay paused when a pause expires on its own.
pub fn status(store: &dyn Store, email: &str, now: DateTime<Utc>) -> Result<PauseStatus> {
    let Some(pause) = store.get_active_emergency_pause(email)? else {
        return Ok(PauseStatus::Inactive {
            auto_resumed: false,
        });
    };

    if now >= pause.ends_at {
        store.end_emergency_pause(email, pause.id, now, &[])?;
        return Ok(PauseStatus::Inactive { auto_resumed: true });
    }

    Ok(PauseStatus::Active(pause))
}
