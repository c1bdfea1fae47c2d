//! AI assistant endpoints

pub mod generate_lesson;

use axum::{routing::post, Router};

use super::state::AppState;

/// Create the `/api/ai` router
pub fn create_ai_router() -> Router<AppState> {
    Router::new().route("/generate-lesson", post(generate_lesson::generate_lesson))
}
