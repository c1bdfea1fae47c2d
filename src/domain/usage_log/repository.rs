use async_trait::async_trait;
use std::fmt::Debug;

use super::UsageLog;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence for AI usage log entries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UsageLogRepository: Send + Sync + Debug {
    /// Store a new entry
    async fn record(&self, log: UsageLog) -> Result<(), DomainError>;

    /// Most recent entries for a user, newest first
    async fn list_for_user(&self, user_id: &str, limit: usize)
        -> Result<Vec<UsageLog>, DomainError>;
}
