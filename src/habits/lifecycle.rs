//! Habit mutations that are announced to the owner as notifications.
//!
//! Each operation hands the mutation and its [`HabitEvent`] to the store in a
//! single call so both commit together.

use chrono::Utc;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Habit, HabitEvent, HabitStatus, NewHabit, NotificationAction};

fn event(owner: &str, action: NotificationAction, habit_name: &str, message: String) -> HabitEvent {
    HabitEvent {
        user_email: owner.to_string(),
        message,
        action,
        habit_name: Some(habit_name.to_string()),
    }
}

pub fn create_habit(store: &dyn Store, habit: &NewHabit) -> Result<Habit> {
    let added = event(
        &habit.owner,
        NotificationAction::Added,
        &habit.name,
        format!("Added habit: {}", habit.name),
    );
    let created = store.create_habit(habit, Some(&added))?;
    tracing::info!(habit_id = created.id, "Created habit");
    Ok(created)
}

/// Renames a habit. A blank name leaves the habit untouched.
pub fn rename_habit(store: &dyn Store, owner: &str, id: i64, new_name: &str) -> Result<Habit> {
    let mut habit = store.get_habit(owner, id)?.ok_or(Error::NotFound)?;

    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Ok(habit);
    }

    let old_name = std::mem::replace(&mut habit.name, new_name.to_string());
    let edited = event(
        owner,
        NotificationAction::Edited,
        new_name,
        format!("Edited habit: '{old_name}' to '{new_name}'"),
    );
    store.update_habit(&habit, Some(&edited))?;
    Ok(habit)
}

/// Permanently deletes a habit and returns what was removed.
pub fn delete_habit(store: &dyn Store, owner: &str, id: i64) -> Result<Habit> {
    let habit = store.get_habit(owner, id)?.ok_or(Error::NotFound)?;

    let deleted = event(
        owner,
        NotificationAction::Deleted,
        &habit.name,
        format!("Deleted habit: {}", habit.name),
    );
    if !store.delete_habit(owner, id, Some(&deleted))? {
        return Err(Error::NotFound);
    }
    tracing::info!(habit_id = id, "Deleted habit");
    Ok(habit)
}

fn status_event(owner: &str, habit: &Habit, status: HabitStatus, on: bool) -> HabitEvent {
    let (action, verb) = match (status, on) {
        (HabitStatus::Archived, true) => (NotificationAction::Archived, "Archived habit"),
        (HabitStatus::Archived, false) => (NotificationAction::Unarchived, "Unarchived habit"),
        (HabitStatus::Paused, true) => (NotificationAction::Paused, "Paused habit"),
        (HabitStatus::Paused, false) => (NotificationAction::Resumed, "Resumed habit"),
        (HabitStatus::Completed, true) => (NotificationAction::Completed, "🎉 Completed habit"),
        (HabitStatus::Completed, false) => (NotificationAction::Uncompleted, "Reactivated habit"),
    };
    event(owner, action, &habit.name, format!("{verb}: {}", habit.name))
}

/// Sets or clears one of the independent status flags.
pub fn set_status(
    store: &dyn Store,
    owner: &str,
    id: i64,
    status: HabitStatus,
    on: bool,
) -> Result<Habit> {
    let mut habit = store.get_habit(owner, id)?.ok_or(Error::NotFound)?;

    habit.set_status(status, on, Utc::now());
    let announced = status_event(owner, &habit, status, on);
    store.update_habit(&habit, Some(&announced))?;
    Ok(habit)
}
