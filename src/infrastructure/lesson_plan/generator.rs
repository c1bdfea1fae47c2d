//! Lesson-plan generation against a chat-completion provider

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, error, info};

use crate::domain::lesson_plan::{
    build_messages, parse_structured_reply, GenerationError, GenerationRequest,
    LessonPlanSuggestion,
};
use crate::domain::llm::ChatCompletionRequest;
use crate::infrastructure::llm::{ChatCompletionClient, HttpClientTrait};

pub const DEFAULT_MODEL: &str = "k2";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Trait for lesson-plan generation (for dynamic dispatch and mocking)
#[async_trait]
pub trait LessonPlanGeneratorTrait: Send + Sync + Debug {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<LessonPlanSuggestion, GenerationError>;
}

/// Sampling parameters sent with every generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Builds the prompt, calls the provider once and parses the reply
#[derive(Debug)]
pub struct LessonPlanGenerator<C: HttpClientTrait> {
    client: ChatCompletionClient<C>,
    config: GeneratorConfig,
}

impl<C: HttpClientTrait> LessonPlanGenerator<C> {
    pub fn new(client: ChatCompletionClient<C>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn completion_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        ChatCompletionRequest::new(&self.config.model, build_messages(request))
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LessonPlanGeneratorTrait for LessonPlanGenerator<C> {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<LessonPlanSuggestion, GenerationError> {
        info!(
            topic = %request.topic(),
            grade = %request.grade(),
            subject = %request.subject(),
            duration_minutes = request.duration_minutes(),
            model = %self.config.model,
            "Generating lesson plan"
        );

        let result = self.client.complete(&self.completion_request(request)).await?;

        if let Some(usage) = &result.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Lesson plan reply received"
            );
        }

        let content = result.first_content().ok_or_else(|| {
            error!("No content in lesson plan reply");
            GenerationError::EmptyReply
        })?;

        parse_structured_reply(content).map_err(|e| {
            error!(raw_content = %content, error = %e, "Failed to parse lesson plan reply");
            GenerationError::upstream_format(content, e)
        })
    }
}
