mod checkins;
mod emergency;
mod quiz;
mod reports;
mod templates;
mod tracker;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::server::AppState;

pub fn habits_router() -> Router<Arc<AppState>> {
    Router::new()
        // Habits
        .route(
            "/habit-tracker",
            get(tracker::list_habits).post(tracker::create_habit),
        )
        .route("/habit-tracker/update/{id}", post(tracker::update_habit))
        .route("/habit-tracker/delete/{id}", post(tracker::delete_habit))
        .route("/habit-tracker/archived", get(tracker::list_archived))
        // Status flags
        .route("/habit-tracker/archive/{id}", post(tracker::archive_habit))
        .route("/habit-tracker/unarchive/{id}", post(tracker::unarchive_habit))
        .route("/habit-tracker/pause/{id}", post(tracker::pause_habit))
        .route("/habit-tracker/resume/{id}", post(tracker::resume_habit))
        .route("/habit-tracker/complete/{id}", post(tracker::complete_habit))
        .route("/habit-tracker/uncomplete/{id}", post(tracker::uncomplete_habit))
        // Daily check-ins (the canonical route plus legacy aliases)
        .route("/habit-tracker/toggle/{id}", post(checkins::toggle_completion))
        .route("/toggle-completion/{id}", post(checkins::toggle_completion))
        .route("/toggle_completion/{id}", post(checkins::toggle_completion))
        .route(
            "/habit-tracker/toggle-completion/{id}",
            post(checkins::toggle_completion),
        )
        .route(
            "/habit-tracker/toggle_completion/{id}",
            post(checkins::toggle_completion),
        )
        .route("/habit-tracker/reorder", post(checkins::reorder_habits))
        // Reports
        .route("/habit-tracker/stats", get(reports::stats))
        .route("/habit-tracker/export/csv", get(reports::export_csv))
        // Templates
        .route("/habit-tracker/templates", get(templates::list_templates))
        .route(
            "/habit-tracker/add-from-template",
            post(templates::add_from_template),
        )
        // Quiz
        .route("/habit-tracker/quiz/questions", get(quiz::list_questions))
        .route("/habit-tracker/quiz/results", post(quiz::submit_answers))
        .route("/habit-tracker/quiz/add-habits", post(quiz::add_recommended))
        // Emergency pause
        .route(
            "/habit-tracker/emergency/pause",
            post(emergency::activate_pause),
        )
        .route("/habit-tracker/emergency/resume", post(emergency::end_pause))
        .route("/habit-tracker/emergency/status", get(emergency::pause_status))
}
