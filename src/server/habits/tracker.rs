use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde_json::json;

use crate::auth::RequireSession;
use crate::habits::listing::BUILTIN_CATEGORIES;
use crate::habits::{
    available_categories, compose_active, compose_archived, compose_completed, compose_paused,
    create_habit as create, delete_habit as delete, rename_habit, set_status,
};
use crate::server::AppState;
use crate::server::dto::{
    CreateHabitForm, HabitListResponse, HabitView, ListHabitsParams, UpdateHabitForm,
};
use crate::server::response::{ApiError, HOME, RecordId, StoreResultExt, redirect_back};
use crate::types::{HabitStatus, NewHabit};

pub async fn list_habits(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListHabitsParams>,
) -> impl IntoResponse {
    let habits = state
        .store
        .list_habits(auth.email())
        .api_err("Failed to list habits")?;

    let query = params.to_query();
    let today = Utc::now().date_naive();

    let response = HabitListResponse {
        habits: HabitView::list(compose_active(&habits, &query), today),
        paused_habits: HabitView::list(compose_paused(&habits, &query), today),
        completed_habits: HabitView::list(compose_completed(&habits), today),
        categories: BUILTIN_CATEGORIES.iter().map(|c| (*c).to_string()).collect(),
        filter_categories: available_categories(&habits),
        current_sort: query.sort.as_str(),
        current_categories: query.categories,
        current_priorities: query.priorities,
        search_query: query.search.unwrap_or_default(),
    };

    Ok::<_, ApiError>(Json(response))
}

/// A blank name is ignored and still redirects home.
pub async fn create_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateHabitForm>,
) -> impl IntoResponse {
    let new_habit = NewHabit::new(
        auth.email(),
        &form.name,
        form.description.as_deref(),
        form.resolved_category(),
        form.priority(),
    );

    if let Some(new_habit) = new_habit {
        create(state.store.as_ref(), &new_habit).api_err("Failed to create habit")?;
    }

    Ok::<_, ApiError>(Redirect::to(HOME))
}

pub async fn update_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<UpdateHabitForm>,
) -> impl IntoResponse {
    rename_habit(state.store.as_ref(), auth.email(), id, &form.name)
        .or_missing("Habit not found")?;

    Ok::<_, ApiError>(Redirect::to(HOME))
}

pub async fn delete_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> impl IntoResponse {
    delete(state.store.as_ref(), auth.email(), id).or_missing("Habit not found")?;

    Ok::<_, ApiError>(Redirect::to(HOME))
}

fn change_status(
    state: &AppState,
    email: &str,
    id: i64,
    status: HabitStatus,
    on: bool,
) -> Result<(), ApiError> {
    set_status(state.store.as_ref(), email, id, status, on).or_missing("Habit not found")?;
    tracing::debug!(habit_id = id, ?status, on, "Changed habit status");
    Ok(())
}

pub async fn archive_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Archived, true)?;
    Ok(Redirect::to(HOME))
}

pub async fn unarchive_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Archived, false)?;
    Ok(redirect_back(&headers, HOME))
}

pub async fn pause_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Paused, true)?;
    Ok(Redirect::to(HOME))
}

pub async fn resume_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    headers: HeaderMap,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Paused, false)?;
    Ok(redirect_back(&headers, HOME))
}

pub async fn complete_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Completed, true)?;
    Ok(Redirect::to(HOME))
}

pub async fn uncomplete_habit(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    change_status(&state, auth.email(), id, HabitStatus::Completed, false)?;
    Ok(Redirect::to(HOME))
}

pub async fn list_archived(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let habits = state
        .store
        .list_habits(auth.email())
        .api_err("Failed to list habits")?;

    let today = Utc::now().date_naive();
    let archived = HabitView::list(compose_archived(&habits), today);

    Ok::<_, ApiError>(Json(json!({ "habits": archived })))
}
