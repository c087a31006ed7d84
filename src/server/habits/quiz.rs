use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

use super::templates::{add_from_seed, existing_names};
use crate::auth::RequireSession;
use crate::quiz::{QUESTIONS, score_answers};
use crate::server::AppState;
use crate::server::dto::{QuizAddHabitsRequest, QuizAnswersRequest};
use crate::server::response::{ApiError, StoreResultExt};
use crate::types::QuizResult;

pub async fn list_questions(_auth: RequireSession) -> impl IntoResponse {
    Json(json!({ "questions": QUESTIONS, "total": QUESTIONS.len() }))
}

pub async fn submit_answers(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuizAnswersRequest>,
) -> impl IntoResponse {
    let personality = score_answers(&req.answers)?;
    let profile = personality.profile();

    let recommendations = state
        .store
        .list_templates(Some(personality))
        .api_err("Failed to load recommendations")?;

    let result = QuizResult {
        user_email: auth.email().to_string(),
        personality,
        answers: json!(req.answers),
        updated_at: Utc::now(),
    };
    state
        .store
        .upsert_quiz_result(&result)
        .api_err("Failed to save quiz result")?;

    tracing::info!(%personality, "Saved quiz result");

    Ok::<_, ApiError>(Json(json!({
        "success": true,
        "personality": personality,
        "profile": profile,
        "insights": profile.insights,
        "avoid_habits": profile.avoid_habits,
        "recommendations": recommendations,
    })))
}

/// Adds the chosen recommendations, skipping names the user already has.
pub async fn add_recommended(
    auth: RequireSession,
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuizAddHabitsRequest>,
) -> impl IntoResponse {
    if req.template_ids.is_empty() {
        return Err(ApiError::bad_request(
            "Please select at least one habit to add",
        ));
    }

    let store = state.store.as_ref();
    let mut taken = existing_names(store, auth.email())?;
    let mut added = 0;

    for id in req.template_ids {
        let Some(template) = store.get_template(id).api_err("Failed to get template")? else {
            continue;
        };
        if taken.contains(&template.name) {
            continue;
        }
        if let Some(habit) = add_from_seed(store, auth.email(), &template)? {
            taken.insert(habit.name);
            added += 1;
        }
    }

    Ok::<_, ApiError>(Json(json!({ "success": true, "added": added })))
}
