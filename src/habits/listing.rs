//! Read-side projections of a user's habits: filtering, search and sorting.
//!
//! Everything here is a pure function of the habits passed in.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::Habit;

/// Categories offered even when no habit uses them yet.
pub const BUILTIN_CATEGORIES: [&str; 8] = [
    "Health",
    "Fitness",
    "Study",
    "Productivity",
    "Mindfulness",
    "Finance",
    "Social",
    "Chores",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Priority,
    Az,
    Za,
    Oldest,
    Newest,
    /// Drag-and-drop order.
    Manual,
}

impl SortKey {
    /// Unknown or missing keys sort by priority.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("az") => SortKey::Az,
            Some("za") => SortKey::Za,
            Some("oldest") => SortKey::Oldest,
            Some("newest") => SortKey::Newest,
            Some("manual") => SortKey::Manual,
            _ => SortKey::Priority,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::Az => "az",
            SortKey::Za => "za",
            SortKey::Oldest => "oldest",
            SortKey::Newest => "newest",
            SortKey::Manual => "manual",
        }
    }
}

/// Filters and sort order for the active habit list.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub categories: Vec<String>,
    /// Raw priority tokens; one that names no priority matches nothing.
    pub priorities: Vec<String>,
    pub search: Option<String>,
    pub sort: SortKey,
}

impl ListQuery {
    /// Builds a query from the comma-delimited external form.
    #[must_use]
    pub fn from_params(
        sort: Option<&str>,
        categories: Option<&str>,
        priorities: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            categories: split_list(categories),
            priorities: split_list(priorities),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort: SortKey::parse(sort),
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    fn matches(&self, habit: &Habit) -> bool {
        if !self.categories.is_empty() {
            let Some(category) = habit.category.as_deref() else {
                return false;
            };
            if !self.categories.iter().any(|c| c == category) {
                return false;
            }
        }

        if !self.priorities.is_empty()
            && !self.priorities.iter().any(|p| p == habit.priority.as_str())
        {
            return false;
        }

        match &self.search {
            Some(term) => matches_search(habit, term),
            None => true,
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring match on name, description or category.
#[must_use]
pub fn matches_search(habit: &Habit, term: &str) -> bool {
    let needle = term.to_lowercase();
    let hit = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&needle));

    hit(Some(habit.name.as_str())) || hit(habit.description.as_deref()) || hit(habit.category.as_deref())
}

/// Sorts in place. Every ordering is stable.
pub fn sort_habits(habits: &mut [Habit], key: SortKey) {
    match key {
        SortKey::Priority => habits.sort_by_key(|h| (h.priority.rank(), h.created_at)),
        SortKey::Az => habits.sort_by_cached_key(|h| h.name.to_lowercase()),
        SortKey::Za => habits.sort_by_cached_key(|h| Reverse(h.name.to_lowercase())),
        SortKey::Oldest => habits.sort_by_key(|h| h.created_at),
        SortKey::Newest => habits.sort_by_key(|h| Reverse(h.created_at)),
        SortKey::Manual => habits.sort_by_key(|h| (h.position, h.created_at)),
    }
}

/// Active habits matching `query`, in the requested order.
#[must_use]
pub fn compose_active(habits: &[Habit], query: &ListQuery) -> Vec<Habit> {
    let mut active: Vec<Habit> = habits
        .iter()
        .filter(|h| h.is_active() && query.matches(h))
        .cloned()
        .collect();
    sort_habits(&mut active, query.sort);
    active
}

/// Paused, non-archived habits, most recently paused first.
/// Always empty while a search is active.
#[must_use]
pub fn compose_paused(habits: &[Habit], query: &ListQuery) -> Vec<Habit> {
    if query.is_searching() {
        return Vec::new();
    }

    let mut paused: Vec<Habit> = habits
        .iter()
        .filter(|h| h.is_paused() && !h.is_archived())
        .cloned()
        .collect();
    paused.sort_by_key(|h| Reverse(h.paused_at));
    paused
}

/// Completed, non-archived habits, most recently completed first.
#[must_use]
pub fn compose_completed(habits: &[Habit]) -> Vec<Habit> {
    let mut completed: Vec<Habit> = habits
        .iter()
        .filter(|h| h.is_completed() && !h.is_archived())
        .cloned()
        .collect();
    completed.sort_by_key(|h| Reverse(h.completed_at));
    completed
}

/// Archived habits, most recently archived first.
#[must_use]
pub fn compose_archived(habits: &[Habit]) -> Vec<Habit> {
    let mut archived: Vec<Habit> = habits.iter().filter(|h| h.is_archived()).cloned().collect();
    archived.sort_by_key(|h| Reverse(h.archived_at));
    archived
}

/// Built-in categories plus every non-blank stored category, ascending.
#[must_use]
pub fn available_categories(habits: &[Habit]) -> Vec<String> {
    let mut categories: BTreeSet<String> =
        BUILTIN_CATEGORIES.iter().map(|c| (*c).to_string()).collect();

    categories.extend(
        habits
            .iter()
            .filter_map(|h| h.category.as_deref())
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string),
    );

    categories.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::CompletionLog;
    use crate::types::Priority;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(n)
    }

    fn habit(id: i64, name: &str, priority: Priority, created_day: i64) -> Habit {
        Habit {
            id,
            owner: "a@example.com".to_string(),
            name: name.to_string(),
            description: None,
            category: None,
            priority,
            created_at: day(created_day),
            completed_dates: CompletionLog::default(),
            position: id,
            archived_at: None,
            paused_at: None,
            completed_at: None,
        }
    }

    fn names(habits: &[Habit]) -> Vec<&str> {
        habits.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_priority_sort_breaks_ties_by_creation() {
        let habits = vec![
            habit(1, "A", Priority::High, 1),
            habit(2, "B", Priority::Medium, 2),
            habit(3, "C", Priority::High, 3),
        ];

        let listed = compose_active(&habits, &ListQuery::default());
        assert_eq!(names(&listed), ["A", "C", "B"]);
    }

    #[test]
    fn test_priority_rank_low_last() {
        let habits = vec![
            habit(1, "Low", Priority::Low, 1),
            habit(2, "Medium", Priority::Medium, 2),
            habit(3, "High", Priority::High, 3),
        ];

        let listed = compose_active(&habits, &ListQuery::default());
        assert_eq!(names(&listed), ["High", "Medium", "Low"]);
    }

    #[test]
    fn test_name_and_date_sorts() {
        let habits = vec![
            habit(1, "banana", Priority::Medium, 2),
            habit(2, "Apple", Priority::Medium, 3),
            habit(3, "cherry", Priority::Medium, 1),
        ];

        let by = |sort| {
            let query = ListQuery {
                sort,
                ..Default::default()
            };
            compose_active(&habits, &query)
                .into_iter()
                .map(|h| h.name)
                .collect::<Vec<_>>()
        };

        assert_eq!(by(SortKey::Az), ["Apple", "banana", "cherry"]);
        assert_eq!(by(SortKey::Za), ["cherry", "banana", "Apple"]);
        assert_eq!(by(SortKey::Oldest), ["cherry", "banana", "Apple"]);
        assert_eq!(by(SortKey::Newest), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_manual_sort_uses_position() {
        let mut habits = vec![
            habit(1, "A", Priority::High, 1),
            habit(2, "B", Priority::High, 2),
            habit(3, "C", Priority::High, 3),
        ];
        habits[0].position = 3;
        habits[1].position = 1;
        habits[2].position = 2;

        let query = ListQuery {
            sort: SortKey::Manual,
            ..Default::default()
        };
        assert_eq!(names(&compose_active(&habits, &query)), ["B", "C", "A"]);
    }

    #[test]
    fn test_unknown_sort_defaults_to_priority() {
        assert_eq!(SortKey::parse(None), SortKey::Priority);
        assert_eq!(SortKey::parse(Some("bogus")), SortKey::Priority);
        assert_eq!(SortKey::parse(Some("za")), SortKey::Za);
    }

    #[test]
    fn test_active_excludes_archived_paused_and_completed() {
        let now = Utc::now();
        let mut habits = vec![
            habit(1, "Active", Priority::Medium, 1),
            habit(2, "Archived", Priority::Medium, 1),
            habit(3, "Paused", Priority::Medium, 1),
            habit(4, "Completed", Priority::Medium, 1),
        ];
        habits[1].archived_at = Some(now);
        habits[2].paused_at = Some(now);
        habits[3].completed_at = Some(now);

        let listed = compose_active(&habits, &ListQuery::default());
        assert_eq!(names(&listed), ["Active"]);
    }

    #[test]
    fn test_category_and_priority_filters() {
        let mut habits = vec![
            habit(1, "Run", Priority::High, 1),
            habit(2, "Read", Priority::Low, 2),
            habit(3, "Save", Priority::High, 3),
            habit(4, "Loose", Priority::High, 4),
        ];
        habits[0].category = Some("Health".to_string());
        habits[1].category = Some("Study".to_string());
        habits[2].category = Some("Finance".to_string());

        let query = ListQuery::from_params(None, Some("Health,Study"), None, None);
        assert_eq!(names(&compose_active(&habits, &query)), ["Run", "Read"]);

        let query = ListQuery::from_params(None, Some("Health,Study"), Some("High"), None);
        assert_eq!(names(&compose_active(&habits, &query)), ["Run"]);

        let query = ListQuery::from_params(None, Some("health"), None, None);
        assert!(compose_active(&habits, &query).is_empty());
    }

    #[test]
    fn test_unrecognised_priority_matches_nothing() {
        let habits = vec![
            habit(1, "Run", Priority::High, 1),
            habit(2, "Read", Priority::Low, 2),
        ];

        let query = ListQuery::from_params(None, None, Some("high"), None);
        assert!(compose_active(&habits, &query).is_empty());
        assert_eq!(query.priorities, ["high"]);

        let query = ListQuery::from_params(None, None, Some("Urgent"), None);
        assert!(compose_active(&habits, &query).is_empty());

        let query = ListQuery::from_params(None, None, Some("Urgent,Low"), None);
        assert_eq!(names(&compose_active(&habits, &query)), ["Read"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut habits = vec![
            habit(1, "Morning Run", Priority::Medium, 1),
            habit(2, "Journal", Priority::Medium, 2),
            habit(3, "Budget", Priority::Medium, 3),
        ];
        habits[1].description = Some("Write three RUNNING thoughts".to_string());
        habits[2].category = Some("Finance".to_string());

        let query = ListQuery::from_params(None, None, None, Some("run"));
        assert_eq!(names(&compose_active(&habits, &query)), ["Morning Run", "Journal"]);

        let query = ListQuery::from_params(None, None, None, Some("FINANCE"));
        assert_eq!(names(&compose_active(&habits, &query)), ["Budget"]);

        let query = ListQuery::from_params(None, None, None, Some("   "));
        assert_eq!(compose_active(&habits, &query).len(), 3);
    }

    #[test]
    fn test_search_suppresses_paused_list() {
        let mut habits = vec![habit(1, "Meditate", Priority::Medium, 1)];
        habits[0].paused_at = Some(Utc::now());

        let query = ListQuery::from_params(None, None, None, Some("medit"));
        assert!(compose_paused(&habits, &query).is_empty());
        assert!(compose_active(&habits, &query).is_empty());

        let unfiltered = ListQuery::default();
        assert_eq!(names(&compose_paused(&habits, &unfiltered)), ["Meditate"]);
    }

    #[test]
    fn test_paused_list_newest_first_and_excludes_archived() {
        let mut habits = vec![
            habit(1, "Old pause", Priority::Medium, 1),
            habit(2, "New pause", Priority::Medium, 1),
            habit(3, "Archived pause", Priority::Medium, 1),
        ];
        habits[0].paused_at = Some(day(5));
        habits[1].paused_at = Some(day(6));
        habits[2].paused_at = Some(day(7));
        habits[2].archived_at = Some(day(7));

        let paused = compose_paused(&habits, &ListQuery::default());
        assert_eq!(names(&paused), ["New pause", "Old pause"]);
    }

    #[test]
    fn test_completed_list_newest_first() {
        let mut habits = vec![
            habit(1, "Habit 1", Priority::Medium, 1),
            habit(2, "Habit 2", Priority::Medium, 1),
            habit(3, "Habit 3", Priority::Medium, 1),
        ];
        habits[0].completed_at = Some(day(1));
        habits[1].completed_at = Some(day(2));
        habits[2].completed_at = Some(day(3));

        assert_eq!(
            names(&compose_completed(&habits)),
            ["Habit 3", "Habit 2", "Habit 1"]
        );
    }

    #[test]
    fn test_available_categories_union_sorted() {
        let mut habits = vec![
            habit(1, "A", Priority::Medium, 1),
            habit(2, "B", Priority::Medium, 1),
            habit(3, "C", Priority::Medium, 1),
        ];
        habits[0].category = Some("Gardening".to_string());
        habits[1].category = Some("Health".to_string());
        habits[2].category = Some("  ".to_string());

        let categories = available_categories(&habits);
        assert_eq!(categories.len(), BUILTIN_CATEGORIES.len() + 1);
        assert!(categories.contains(&"Gardening".to_string()));
        assert!(categories.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_compose_is_repeatable() {
        let habits = vec![
            habit(1, "A", Priority::Low, 1),
            habit(2, "B", Priority::High, 2),
        ];
        let query = ListQuery::default();
        let first = names(&compose_active(&habits, &query))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let second = names(&compose_active(&habits, &query))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        assert_eq!(first, second);
    }
}
