use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use crate::auth::RequireSession;
use crate::habits::create_habit;
use crate::server::AppState;
use crate::server::dto::{AddFromTemplateRequest, HabitView};
use crate::server::response::{ApiError, StoreOptionExt, StoreResultExt};
use crate::store::Store;
use crate::types::{Habit, HabitTemplate, NewHabit, Priority};

/// Names the user already tracks, in any status.
pub(super) fn existing_names(store: &dyn Store, email: &str) -> Result<HashSet<String>, ApiError> {
    let habits = store.list_habits(email).api_err("Failed to list habits")?;
    Ok(habits.into_iter().map(|h| h.name).collect())
}

/// Creates a habit from a template's fields, announcing it like any new habit.
pub(super) fn add_from_seed(
    store: &dyn Store,
    email: &str,
    template: &HabitTemplate,
) -> Result<Option<Habit>, ApiError> {
    let Some(new_habit) = NewHabit::new(
        email,
        &template.name,
        Some(&template.description),
        Some(&template.category),
        template.priority,
    ) else {
        return Ok(None);
    };

    let habit = create_habit(store, &new_habit).api_err("Failed to create habit")?;
    Ok(Some(habit))
}

/// A non-blank request value, else the template's.
fn pick<'a>(custom: Option<&'a str>, fallback: Option<&'a str>) -> Option<&'a str> {
    custom.filter(|v| !v.trim().is_empty()).or(fallback)
}

pub async fn list_templates(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let store = state.store.as_ref();
    let taken = existing_names(store, auth.email())?;

    let templates = store
        .list_templates(None)
        .api_err("Failed to list templates")?;

    let mut grouped: BTreeMap<String, Vec<HabitTemplate>> = BTreeMap::new();
    let mut total = 0;
    for template in templates.into_iter().filter(|t| !taken.contains(&t.name)) {
        grouped
            .entry(template.category.clone())
            .or_default()
            .push(template);
        total += 1;
    }

    Ok::<_, ApiError>(Json(json!({ "templates": grouped, "total": total })))
}

/// Adds a habit from a template. Request fields override the template's.
/// Without a template, `name` is required.
pub async fn add_from_template(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddFromTemplateRequest>,
) -> impl IntoResponse {
    let store = state.store.as_ref();

    let template = match req.template_id {
        Some(id) => Some(
            store
                .get_template(id)
                .api_err("Failed to get template")?
                .or_not_found("Template not found")?,
        ),
        None => None,
    };

    let name = pick(req.name.as_deref(), template.as_ref().map(|t| t.name.as_str()))
        .unwrap_or_default();
    let priority = req
        .priority
        .as_deref()
        .map(Priority::parse_or_default)
        .or(template.as_ref().map(|t| t.priority))
        .unwrap_or_default();

    let new_habit = NewHabit::new(
        auth.email(),
        name,
        pick(
            req.description.as_deref(),
            template.as_ref().map(|t| t.description.as_str()),
        ),
        pick(
            req.category.as_deref(),
            template.as_ref().map(|t| t.category.as_str()),
        ),
        priority,
    )
    .ok_or_else(|| ApiError::bad_request("Habit name is required"))?;

    if store
        .habit_name_exists(auth.email(), &new_habit.name)
        .api_err("Failed to check habit")?
    {
        return Err(ApiError::bad_request("Habit already exists"));
    }

    let habit = create_habit(store, &new_habit).api_err("Failed to create habit")?;
    let view = HabitView::new(habit, Utc::now().date_naive());

    Ok::<_, ApiError>(Json(json!({ "success": true, "habit": view })))
}
