//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::TokenVerifier;
use crate::infrastructure::lesson_plan::LessonPlanGeneratorTrait;
use crate::infrastructure::usage_log::UsageLogServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn LessonPlanGeneratorTrait>,
    pub usage_log: Arc<dyn UsageLogServiceTrait>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn LessonPlanGeneratorTrait>,
        usage_log: Arc<dyn UsageLogServiceTrait>,
        token_verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            generator,
            usage_log,
            token_verifier,
        }
    }
}
