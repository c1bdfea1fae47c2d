//! PostgreSQL usage log repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::usage_log::{
    GenerationMetadata, UsageAction, UsageLog, UsageLogId, UsageLogRepository,
};
use crate::domain::DomainError;

/// PostgreSQL implementation of UsageLogRepository, stored in `ai_usage_logs`
#[derive(Debug, Clone)]
pub struct PostgresUsageLogRepository {
    pool: PgPool,
}

impl PostgresUsageLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and make sure the table exists
    pub async fn connect(database_url: &str) -> Result<Self, DomainError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let repository = Self::new(pool);
        repository.ensure_table().await?;
        Ok(repository)
    }

    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ai_usage_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                action TEXT NOT NULL,
                metadata JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create ai_usage_logs table: {}", e)))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS ai_usage_logs_user_created_idx ON ai_usage_logs (user_id, created_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create ai_usage_logs index: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UsageLogRepository for PostgresUsageLogRepository {
    async fn record(&self, log: UsageLog) -> Result<(), DomainError> {
        let metadata = serde_json::to_value(&log.metadata)
            .map_err(|e| DomainError::internal(format!("Failed to encode metadata: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO ai_usage_logs (id, user_id, action, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(log.id().as_str())
        .bind(&log.user_id)
        .bind(log.action.as_str())
        .bind(metadata)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert usage log: {}", e)))?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<UsageLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, action, metadata, created_at
            FROM ai_usage_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list usage logs: {}", e)))?;

        rows.iter().map(row_to_usage_log).collect()
    }
}

fn row_to_usage_log(row: &sqlx::postgres::PgRow) -> Result<UsageLog, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Failed to read id: {}", e)))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DomainError::storage(format!("Failed to read user_id: {}", e)))?;
    let action: String = row
        .try_get("action")
        .map_err(|e| DomainError::storage(format!("Failed to read action: {}", e)))?;
    let metadata: serde_json::Value = row
        .try_get("metadata")
        .map_err(|e| DomainError::storage(format!("Failed to read metadata: {}", e)))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(format!("Failed to read created_at: {}", e)))?;

    let action: UsageAction = action.parse().map_err(DomainError::storage)?;
    let metadata: GenerationMetadata = serde_json::from_value(metadata)
        .map_err(|e| DomainError::storage(format!("Invalid usage log metadata: {}", e)))?;

    Ok(UsageLog::restore(
        UsageLogId::new(id),
        user_id,
        action,
        metadata,
        created_at,
    ))
}
