use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::habits::ListQuery;
use crate::types::{Habit, Priority};

#[derive(Debug, Default, Deserialize)]
pub struct ListHabitsParams {
    pub sort: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

impl ListHabitsParams {
    #[must_use]
    pub fn to_query(&self) -> ListQuery {
        ListQuery::from_params(
            self.sort.as_deref(),
            self.category.as_deref(),
            self.priority.as_deref(),
            self.search.as_deref(),
        )
    }
}

/// Form body of `POST /habit-tracker`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateHabitForm {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    /// `other` selects `category_custom`.
    pub category: Option<String>,
    pub category_custom: Option<String>,
    pub priority: Option<String>,
}

impl CreateHabitForm {
    #[must_use]
    pub fn resolved_category(&self) -> Option<&str> {
        match self.category.as_deref() {
            Some("other") => self.category_custom.as_deref(),
            other => other,
        }
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
            .as_deref()
            .map(Priority::parse_or_default)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHabitForm {
    #[serde(default)]
    pub name: String,
}

/// A habit as rendered to clients, with derived flags.
#[derive(Debug, Serialize)]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub display_category: String,
    pub is_archived: bool,
    pub is_paused: bool,
    pub is_completed: bool,
    pub completed_today: bool,
    pub streak: u32,
}

impl HabitView {
    #[must_use]
    pub fn new(habit: Habit, today: NaiveDate) -> Self {
        Self {
            display_category: habit.display_category().to_string(),
            is_archived: habit.is_archived(),
            is_paused: habit.is_paused(),
            is_completed: habit.is_completed(),
            completed_today: habit.completed_dates.contains(today),
            streak: habit.completed_dates.current_streak(today),
            habit,
        }
    }

    #[must_use]
    pub fn list(habits: Vec<Habit>, today: NaiveDate) -> Vec<Self> {
        habits.into_iter().map(|h| Self::new(h, today)).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct HabitListResponse {
    pub habits: Vec<HabitView>,
    pub paused_habits: Vec<HabitView>,
    pub completed_habits: Vec<HabitView>,
    pub categories: Vec<String>,
    pub filter_categories: Vec<String>,
    pub current_sort: &'static str,
    pub current_categories: Vec<String>,
    pub current_priorities: Vec<String>,
    pub search_query: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub otp: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddFromTemplateRequest {
    pub template_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizAnswersRequest {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizAddHabitsRequest {
    #[serde(default)]
    pub template_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmergencyPauseRequest {
    pub reason: Option<String>,
    pub duration_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EmergencyStatusResponse {
    pub is_paused: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_resumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}
