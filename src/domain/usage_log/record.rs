//! Usage log entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::lesson_plan::GenerationRequest;

/// Unique identifier for a usage log entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageLogId(String);

impl UsageLogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UsageLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the logged AI call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageAction {
    GenerateLessonPlan,
}

impl UsageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateLessonPlan => "generate_lesson_plan",
        }
    }
}

impl std::fmt::Display for UsageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UsageAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generate_lesson_plan" => Ok(Self::GenerateLessonPlan),
            other => Err(format!("Unknown usage action: {}", other)),
        }
    }
}

/// Parameters of the generation, stored alongside the log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub topic: String,
    pub grade: String,
    pub subject: String,
    pub learning_style: String,
    pub duration: u32,
}

impl From<&GenerationRequest> for GenerationMetadata {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            topic: request.topic().to_string(),
            grade: request.grade().to_string(),
            subject: request.subject().to_string(),
            learning_style: request.learning_style().to_string(),
            duration: request.duration_minutes(),
        }
    }
}

/// Record that a user triggered an AI generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    id: UsageLogId,
    pub user_id: String,
    pub action: UsageAction,
    pub metadata: GenerationMetadata,
    pub created_at: DateTime<Utc>,
}

impl UsageLog {
    pub fn new(
        user_id: impl Into<String>,
        action: UsageAction,
        metadata: GenerationMetadata,
    ) -> Self {
        Self {
            id: UsageLogId::generate(),
            user_id: user_id.into(),
            action,
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Rebuild an entry loaded from storage
    pub fn restore(
        id: UsageLogId,
        user_id: String,
        action: UsageAction,
        metadata: GenerationMetadata,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            action,
            metadata,
            created_at,
        }
    }

    pub fn lesson_plan_generated(user_id: impl Into<String>, request: &GenerationRequest) -> Self {
        Self::new(user_id, UsageAction::GenerateLessonPlan, request.into())
    }

    pub fn id(&self) -> &UsageLogId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_plan_generated_captures_request() {
        let request = GenerationRequest::builder()
            .topic("Fractions")
            .grade("5th")
            .subject("Math")
            .build()
            .unwrap();

        let log = UsageLog::lesson_plan_generated("user_123", &request);

        assert_eq!(log.user_id, "user_123");
        assert_eq!(log.action, UsageAction::GenerateLessonPlan);
        assert_eq!(log.metadata.topic, "Fractions");
        assert_eq!(log.metadata.learning_style, "mixed");
        assert_eq!(log.metadata.duration, 45);
        assert!(!log.id().as_str().is_empty());
    }

    #[test]
    fn test_action_round_trips_through_str() {
        let action: UsageAction = "generate_lesson_plan".parse().unwrap();
        assert_eq!(action, UsageAction::GenerateLessonPlan);
        assert_eq!(action.to_string(), "generate_lesson_plan");
        assert!("delete_everything".parse::<UsageAction>().is_err());
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = GenerationMetadata {
            topic: "Volcanoes".to_string(),
            grade: "4th".to_string(),
            subject: "Geography".to_string(),
            learning_style: "visual".to_string(),
            duration: 30,
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["learning_style"], "visual");
        assert_eq!(json["duration"], 30);
    }
}
