//! Per-habit log of the calendar days a habit was checked off.
//!
//! The log is persisted as a JSON array of `YYYY-MM-DD` strings in a TEXT
//! column. Stored values that do not decode as such an array are treated as an
//! empty log and overwritten on the next write.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::Store;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionLog(Vec<String>);

/// Why a stored completion log could not be used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorruptLog(pub String);

impl CompletionLog {
    /// Decodes a stored log, reporting corrupt input instead of repairing it.
    /// NULL and the empty string are valid encodings of an empty log.
    pub fn try_decode(raw: Option<&str>) -> std::result::Result<Self, CorruptLog> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        serde_json::from_str::<Vec<String>>(raw)
            .map(Self)
            .map_err(|e| CorruptLog(e.to_string()))
    }

    /// Decodes a stored log. Anything unreadable becomes an empty log.
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        Self::try_decode(raw).unwrap_or_else(|CorruptLog(reason)| {
            tracing::debug!("Resetting corrupt completion log: {reason}");
            Self::default()
        })
    }

    /// Canonical stored form: a JSON array of date strings.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let key = date_key(date);
        self.0.iter().any(|d| *d == key)
    }

    /// Flips membership of `date` and returns whether it is now present.
    /// Removal drops every occurrence, so the date is never listed twice.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let key = date_key(date);
        if self.0.iter().any(|d| *d == key) {
            self.0.retain(|d| *d != key);
            false
        } else {
            self.0.push(key);
            true
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consecutive checked-off days ending today, or ending yesterday when
    /// today has not been checked off yet.
    #[must_use]
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let days: BTreeSet<NaiveDate> = self
            .0
            .iter()
            .filter_map(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
            .collect();

        let mut cursor = if days.contains(&today) {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) => yesterday,
                None => return 0,
            }
        };

        let mut streak = 0;
        while days.contains(&cursor) {
            streak += 1;
            cursor = match cursor.pred_opt() {
                Some(prev) => prev,
                None => break,
            };
        }
        streak
    }
}

impl FromIterator<NaiveDate> for CompletionLog {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut log = Self::default();
        for date in iter {
            if !log.contains(date) {
                log.0.push(date_key(date));
            }
        }
        log
    }
}

/// ISO calendar date, the key stored in the log.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub habit_id: i64,
    pub completed_today: bool,
}

/// Checks `today` off for a habit, or un-checks it when already done.
///
/// Any corrupt stored log is discarded and replaced by the freshly toggled one.
pub fn toggle_today(
    store: &dyn Store,
    owner: &str,
    habit_id: i64,
    today: NaiveDate,
) -> Result<ToggleOutcome> {
    let mut habit = store.get_habit(owner, habit_id)?.ok_or(Error::NotFound)?;

    let completed_today = habit.completed_dates.toggle(today);
    store.update_completed_dates(owner, habit.id, &habit.completed_dates)?;

    tracing::debug!(
        habit_id,
        completed_today,
        "Toggled completion for {}",
        date_key(today)
    );

    Ok(ToggleOutcome {
        habit_id,
        completed_today,
    })
}
