//! Lesson-plan generation endpoint handler

use axum::extract::State;
use serde::Deserialize;
use tracing::{error, info};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::lesson_plan::{GenerationRequest, LessonPlanSuggestion};
use crate::infrastructure::usage_log::spawn_record_generation;

/// Body of `POST /api/ai/generate-lesson`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLessonBody {
    pub topic: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub learning_style: Option<String>,
    pub duration: Option<i64>,
}

impl GenerateLessonBody {
    pub fn into_request(self) -> Result<GenerationRequest, ApiError> {
        GenerationRequest::builder()
            .maybe_topic(self.topic)
            .maybe_grade(self.grade)
            .maybe_subject(self.subject)
            .maybe_learning_style(self.learning_style)
            .maybe_duration_minutes(self.duration)
            .build()
            .map_err(ApiError::from)
    }
}

/// POST /api/ai/generate-lesson
pub async fn generate_lesson(
    State(state): State<AppState>,
    RequireUser(identity): RequireUser,
    Json(body): Json<GenerateLessonBody>,
) -> Result<Json<LessonPlanSuggestion>, ApiError> {
    let request = body.into_request()?;

    info!(
        user_id = %identity.user_id(),
        topic = %request.topic(),
        learning_style = %request.learning_style(),
        "Lesson plan requested"
    );

    let suggestion = state.generator.generate(&request).await.map_err(|e| {
        error!(user_id = %identity.user_id(), error = %e, "Lesson plan generation failed");
        ApiError::from(e)
    })?;

    spawn_record_generation(state.usage_log.clone(), identity, request);

    Ok(Json(suggestion))
}
