//! In-memory usage log repository

use std::collections::VecDeque;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::usage_log::{UsageLog, UsageLogRepository};
use crate::domain::DomainError;

/// Bounded in-memory repository; the oldest entries are dropped first
#[derive(Debug)]
pub struct InMemoryUsageLogRepository {
    logs: RwLock<VecDeque<UsageLog>>,
    max_records: usize,
}

impl InMemoryUsageLogRepository {
    pub fn new(max_records: usize) -> Self {
        Self {
            logs: RwLock::new(VecDeque::new()),
            max_records,
        }
    }
}

impl Default for InMemoryUsageLogRepository {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl UsageLogRepository for InMemoryUsageLogRepository {
    async fn record(&self, log: UsageLog) -> Result<(), DomainError> {
        let mut logs = self.logs.write().map_err(|e| {
            DomainError::internal(format!("Failed to acquire write lock: {}", e))
        })?;

        logs.push_back(log);

        while logs.len() > self.max_records {
            logs.pop_front();
        }

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<UsageLog>, DomainError> {
        let logs = self.logs.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(logs
            .iter()
            .rev()
            .filter(|log| log.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
