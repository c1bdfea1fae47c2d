use serde::Serialize;

use super::validation::{missing_required_fields, resolve_duration, RequestValidationError};

pub const DEFAULT_LEARNING_STYLE: &str = "mixed";
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

/// Parameters of a lesson-plan generation
///
/// Only constructible through [`GenerationRequestBuilder`], so an instance
/// always has non-blank topic, grade and subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    topic: String,
    grade: String,
    subject: String,
    learning_style: String,
    duration_minutes: u32,
}

impl GenerationRequest {
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn learning_style(&self) -> &str {
        &self.learning_style
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

/// Builder for GenerationRequest
#[derive(Debug, Default, Clone)]
pub struct GenerationRequestBuilder {
    topic: Option<String>,
    grade: Option<String>,
    subject: Option<String>,
    learning_style: Option<String>,
    duration_minutes: Option<i64>,
}

impl GenerationRequestBuilder {
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn maybe_topic(mut self, topic: Option<String>) -> Self {
        self.topic = topic;
        self
    }

    pub fn maybe_grade(mut self, grade: Option<String>) -> Self {
        self.grade = grade;
        self
    }

    pub fn maybe_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject;
        self
    }

    pub fn learning_style(mut self, learning_style: impl Into<String>) -> Self {
        self.learning_style = Some(learning_style.into());
        self
    }

    pub fn maybe_learning_style(mut self, learning_style: Option<String>) -> Self {
        self.learning_style = learning_style;
        self
    }

    pub fn duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn maybe_duration_minutes(mut self, minutes: Option<i64>) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn build(self) -> Result<GenerationRequest, RequestValidationError> {
        let missing = missing_required_fields(
            self.topic.as_deref(),
            self.grade.as_deref(),
            self.subject.as_deref(),
        );

        if !missing.is_empty() {
            return Err(RequestValidationError::MissingFields(missing));
        }

        let duration_minutes = resolve_duration(self.duration_minutes, DEFAULT_DURATION_MINUTES)?;

        let learning_style = self
            .learning_style
            .filter(|style| !style.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEARNING_STYLE.to_string());

        Ok(GenerationRequest {
            topic: self.topic.unwrap_or_default(),
            grade: self.grade.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            learning_style,
            duration_minutes,
        })
    }
}
