use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lesson plan proposed by the model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlanSuggestion {
    pub title: String,
    pub objectives: Vec<String>,
    pub activities: Vec<String>,
    pub resources: Vec<String>,
}

/// Reply content that does not have the four-key lesson-plan shape
#[derive(Debug, Error)]
#[error("reply is not a lesson plan object: {source}")]
pub struct FormatError {
    #[from]
    source: serde_json::Error,
}

/// Parse the model's reply text into a suggestion
///
/// All four keys are required and must have the right types. Unknown keys are
/// ignored. The counts of objectives, activities and resources are not checked.
pub fn parse_structured_reply(content: &str) -> Result<LessonPlanSuggestion, FormatError> {
    Ok(serde_json::from_str(content)?)
}
