//! Side effects whose failure must not affect the primary operation

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Await `operation`, logging and discarding any error
///
/// Returns `Some` with the value on success and `None` on failure. The error is
/// only recorded as a diagnostic; it never reaches the caller.
pub async fn best_effort<F, T, E>(operation: &'static str, future: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match future.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(operation, error = %e, "Best-effort operation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_passes_value_through() {
        let result = best_effort("count", async { Ok::<_, String>(3) }).await;
        assert_eq!(result, Some(3));
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let result = best_effort("insert", async { Err::<(), _>("table missing") }).await;
        assert_eq!(result, None);
    }
}
