use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habits::CompletionLog;
use crate::quiz::Personality;

pub const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank: High sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parses user or database input, treating anything unrecognised as Medium.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three independent habit statuses. A habit can hold any combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitStatus {
    Archived,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct Habit {
    pub id: i64,
    #[serde(skip)]
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub completed_dates: CompletionLog,
    pub position: i64,
    pub archived_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Habit {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Neither archived, paused nor completed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_archived() && !self.is_paused() && !self.is_completed()
    }

    #[must_use]
    pub fn has_status(&self, status: HabitStatus) -> bool {
        self.status_slot(status).is_some()
    }

    /// Sets or clears a status. Setting always stamps `now`, clearing always drops the stamp.
    pub fn set_status(&mut self, status: HabitStatus, on: bool, now: DateTime<Utc>) {
        *self.status_slot_mut(status) = on.then_some(now);
    }

    /// Category used for grouping and display.
    #[must_use]
    pub fn display_category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    fn status_slot(&self, status: HabitStatus) -> &Option<DateTime<Utc>> {
        match status {
            HabitStatus::Archived => &self.archived_at,
            HabitStatus::Paused => &self.paused_at,
            HabitStatus::Completed => &self.completed_at,
        }
    }

    fn status_slot_mut(&mut self, status: HabitStatus) -> &mut Option<DateTime<Utc>> {
        match status {
            HabitStatus::Archived => &mut self.archived_at,
            HabitStatus::Paused => &mut self.paused_at,
            HabitStatus::Completed => &mut self.completed_at,
        }
    }
}

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fields supplied when creating a habit. Normalised by [`NewHabit::new`].
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl NewHabit {
    /// Trims every field, drops blank optionals and caps the description.
    /// Returns `None` when the name is blank.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        name: &str,
        description: Option<&str>,
        category: Option<&str>,
        priority: Priority,
    ) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.into(),
            name: name.to_string(),
            description: normalize_description(description),
            category: normalize_optional(category),
            priority,
            created_at: Utc::now(),
        })
    }
}

/// Trims and drops blank input.
#[must_use]
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Like [`normalize_optional`], then keeps at most [`MAX_DESCRIPTION_CHARS`] characters.
#[must_use]
pub fn normalize_description(value: Option<&str>) -> Option<String> {
    normalize_optional(value).map(|d| d.chars().take(MAX_DESCRIPTION_CHARS).collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    Added,
    Deleted,
    Edited,
    Archived,
    Unarchived,
    Paused,
    Resumed,
    Completed,
    Uncompleted,
}

impl NotificationAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationAction::Added => "added",
            NotificationAction::Deleted => "deleted",
            NotificationAction::Edited => "edited",
            NotificationAction::Archived => "archived",
            NotificationAction::Unarchived => "unarchived",
            NotificationAction::Paused => "paused",
            NotificationAction::Resumed => "resumed",
            NotificationAction::Completed => "completed",
            NotificationAction::Uncompleted => "uncompleted",
        }
    }
}

impl FromStr for NotificationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added" => Ok(NotificationAction::Added),
            "deleted" => Ok(NotificationAction::Deleted),
            "edited" => Ok(NotificationAction::Edited),
            "archived" => Ok(NotificationAction::Archived),
            "unarchived" => Ok(NotificationAction::Unarchived),
            "paused" => Ok(NotificationAction::Paused),
            "resumed" => Ok(NotificationAction::Resumed),
            "completed" => Ok(NotificationAction::Completed),
            "uncompleted" => Ok(NotificationAction::Uncompleted),
            other => Err(format!("unknown notification action: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(skip)]
    pub user_email: String,
    pub message: String,
    pub action_type: NotificationAction,
    pub habit_name: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A notification to record alongside a habit mutation.
#[derive(Debug, Clone)]
pub struct HabitEvent {
    pub user_email: String,
    pub message: String,
    pub action: NotificationAction,
    pub habit_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub email: String,
    pub has_seen_tutorial: bool,
    pub theme: Theme,
    pub notifications_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Preferences of a user who never saved any.
    #[must_use]
    pub fn defaults_for(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            has_seen_tutorial: false,
            theme: Theme::Light,
            notifications_enabled: true,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(skip)]
    pub token_hash: String,
    #[serde(skip)]
    pub token_lookup: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitTemplate {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub user_email: String,
    pub personality: Personality,
    pub answers: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyPause {
    pub id: i64,
    #[serde(skip)]
    pub user_email: String,
    pub reason: String,
    pub duration_days: i64,
    pub started_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}
