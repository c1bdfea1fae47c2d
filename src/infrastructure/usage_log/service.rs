//! AI usage logging service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::lesson_plan::GenerationRequest;
use crate::domain::usage_log::{UsageLog, UsageLogRepository};
use crate::domain::{DomainError, Identity};
use crate::infrastructure::best_effort::best_effort;

/// Trait for the usage logging service
#[async_trait]
pub trait UsageLogServiceTrait: Send + Sync + Debug {
    /// Record that `identity` generated a lesson plan for `request`
    async fn record_generation(
        &self,
        identity: &Identity,
        request: &GenerationRequest,
    ) -> Result<UsageLog, DomainError>;
}

/// Record a generation on a detached task
///
/// The caller never waits on storage: a failed write is logged and dropped, and
/// a write that stalls only holds up its own task.
pub fn spawn_record_generation(
    service: Arc<dyn UsageLogServiceTrait>,
    identity: Identity,
    request: GenerationRequest,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        best_effort(
            "record_usage_log",
            service.record_generation(&identity, &request),
        )
        .await;
    })
}

/// Usage logging service backed by a repository
#[derive(Debug, Clone)]
pub struct UsageLogService {
    repository: Arc<dyn UsageLogRepository>,
}

impl UsageLogService {
    pub fn new(repository: Arc<dyn UsageLogRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UsageLogServiceTrait for UsageLogService {
    async fn record_generation(
        &self,
        identity: &Identity,
        request: &GenerationRequest,
    ) -> Result<UsageLog, DomainError> {
        let log = UsageLog::lesson_plan_generated(identity.user_id(), request);

        self.repository.record(log.clone()).await?;

        debug!(
            usage_log_id = %log.id(),
            user_id = %log.user_id,
            action = %log.action,
            "Usage log recorded"
        );

        Ok(log)
    }
}
