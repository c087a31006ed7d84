use std::collections::HashMap;

use serde::Serialize;

use crate::types::Habit;

#[derive(Debug, Clone, Serialize)]
pub struct HabitSummary {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Habit> for HabitSummary {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id,
            name: habit.name.clone(),
            created_at: habit.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitStats {
    pub total_habits: usize,
    pub active_habits: usize,
    pub paused_habits: usize,
    pub archived_habits: usize,
    pub completed_habits: usize,
    /// `(category, count)`, largest first.
    pub category_counts: Vec<(String, usize)>,
    pub most_recent: Option<HabitSummary>,
    pub oldest: Option<HabitSummary>,
    /// Whole days between the oldest and the most recent habit.
    pub journey_days: i64,
    /// Percentage of habits that are active.
    pub active_rate: u32,
    pub total_check_ins: usize,
}

#[must_use]
pub fn compute(habits: &[Habit]) -> HabitStats {
    let total = habits.len();
    let active = habits.iter().filter(|h| h.is_active()).count();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for habit in habits {
        *counts.entry(habit.display_category()).or_default() += 1;
    }
    let mut category_counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    category_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let most_recent = habits.iter().max_by_key(|h| h.created_at);
    let oldest = habits.iter().min_by_key(|h| h.created_at);
    let journey_days = match (most_recent, oldest) {
        (Some(newest), Some(oldest)) => (newest.created_at - oldest.created_at).num_days(),
        _ => 0,
    };

    let active_rate = if total == 0 {
        0
    } else {
        (active * 100 / total) as u32
    };

    HabitStats {
        total_habits: total,
        active_habits: active,
        paused_habits: habits
            .iter()
            .filter(|h| h.is_paused() && !h.is_archived())
            .count(),
        archived_habits: habits.iter().filter(|h| h.is_archived()).count(),
        completed_habits: habits.iter().filter(|h| h.is_completed()).count(),
        category_counts,
        most_recent: most_recent.map(HabitSummary::from),
        oldest: oldest.map(HabitSummary::from),
        journey_days,
        active_rate,
        total_check_ins: habits.iter().map(|h| h.completed_dates.len()).sum(),
    }
}
