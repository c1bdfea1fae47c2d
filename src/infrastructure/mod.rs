//! Infrastructure layer - External service implementations

pub mod auth;
pub mod best_effort;
pub mod lesson_plan;
pub mod llm;
pub mod logging;
pub mod usage_log;
