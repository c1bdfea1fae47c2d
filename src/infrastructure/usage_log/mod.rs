//! Usage log infrastructure implementations

mod in_memory;
mod postgres;
mod service;

pub use in_memory::InMemoryUsageLogRepository;
pub use postgres::PostgresUsageLogRepository;
pub use service::{spawn_record_generation, UsageLogService, UsageLogServiceTrait};
