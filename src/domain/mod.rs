//! Domain layer - Core business logic and entities

pub mod error;
pub mod identity;
pub mod lesson_plan;
pub mod llm;
pub mod usage_log;

pub use error::DomainError;
pub use identity::Identity;
pub use lesson_plan::{
    GenerationError, GenerationRequest, LessonPlanDraft, LessonPlanSuggestion,
    RequestValidationError,
};
pub use llm::{ChatCompletionRequest, ChatCompletionResult, ChatMessage, MessageRole};
pub use usage_log::{UsageLog, UsageLogRepository};
