//! CSV download of the active habit list.

use chrono::{DateTime, Utc};

use super::listing::{ListQuery, compose_active};
use crate::types::Habit;

pub const CSV_HEADER: [&str; 6] = [
    "Name",
    "Description",
    "Category",
    "Priority",
    "Created Date",
    "Status",
];

/// Quotes a field when it holds a comma, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let row: Vec<String> = fields.into_iter().map(escape_field).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Renders every active habit, in priority order, as CSV.
#[must_use]
pub fn habits_csv(habits: &[Habit]) -> String {
    let mut out = String::new();
    write_row(&mut out, CSV_HEADER);

    for habit in compose_active(habits, &ListQuery::default()) {
        let created = habit.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
        write_row(
            &mut out,
            [
                habit.name.as_str(),
                habit.description.as_deref().unwrap_or_default(),
                habit.display_category(),
                habit.priority.as_str(),
                created.as_str(),
                "Active",
            ],
        );
    }

    out
}

#[must_use]
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("habits_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
