//! Applying a suggestion to the lesson-plan form
//!
//! The form keeps objectives, activities and resources as newline-separated
//! text areas. Callers that only have the loosely-typed JSON reply can use
//! [`LessonPlanDraft::from_value`], which treats missing lists as empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LessonPlanSuggestion;

/// Form-ready text for a lesson plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlanDraft {
    pub title: String,
    pub objectives: String,
    pub activities: String,
    pub resources: String,
}

impl LessonPlanDraft {
    pub fn from_suggestion(suggestion: &LessonPlanSuggestion) -> Self {
        Self {
            title: suggestion.title.clone(),
            objectives: suggestion.objectives.join("\n"),
            activities: suggestion.activities.join("\n"),
            resources: suggestion.resources.join("\n"),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            objectives: join_lines(value.get("objectives")),
            activities: join_lines(value.get("activities")),
            resources: join_lines(value.get("resources")),
        }
    }
}

impl From<&LessonPlanSuggestion> for LessonPlanDraft {
    fn from(suggestion: &LessonPlanSuggestion) -> Self {
        Self::from_suggestion(suggestion)
    }
}

fn join_lines(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
