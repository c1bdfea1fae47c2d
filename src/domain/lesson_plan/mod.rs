//! Lesson-plan generation domain
//!
//! Requests, prompt construction, reply parsing and the caller-side draft
//! used to fill the lesson-plan form.

mod draft;
mod error;
mod prompt;
mod request;
mod suggestion;
mod template;
mod validation;

pub use draft::LessonPlanDraft;
pub use error::GenerationError;
pub use prompt::{build_messages, system_prompt, user_prompt};
pub use request::{
    GenerationRequest, GenerationRequestBuilder, DEFAULT_DURATION_MINUTES, DEFAULT_LEARNING_STYLE,
};
pub use suggestion::{parse_structured_reply, FormatError, LessonPlanSuggestion};
pub use template::{PromptTemplate, TemplateError};
pub use validation::RequestValidationError;
