//! AI usage logging domain

mod record;
mod repository;

pub use record::{GenerationMetadata, UsageAction, UsageLog, UsageLogId};
pub use repository::UsageLogRepository;

#[cfg(test)]
pub use repository::mock::{FailingUsageLogRepository, StalledUsageLogRepository};
#[cfg(test)]
pub use repository::MockUsageLogRepository;
