//! Generation request validation

use thiserror::Error;

/// Errors that can occur while validating a generation request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Duration must be a positive number of minutes, got {0}")]
    InvalidDuration(i64),
}

impl RequestValidationError {
    /// Names of the missing fields, empty for non-field errors
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields.as_slice(),
            Self::InvalidDuration(_) => &[],
        }
    }
}

/// Collect the names of required fields that are absent or blank
pub fn missing_required_fields(
    topic: Option<&str>,
    grade: Option<&str>,
    subject: Option<&str>,
) -> Vec<&'static str> {
    [("topic", topic), ("grade", grade), ("subject", subject)]
        .into_iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
}

/// Resolve an optional duration to minutes
///
/// Absent or zero means "use the default"; negative values and values beyond
/// `u32` are rejected.
pub fn resolve_duration(duration: Option<i64>, default: u32) -> Result<u32, RequestValidationError> {
    match duration {
        None | Some(0) => Ok(default),
        Some(minutes) => {
            u32::try_from(minutes).map_err(|_| RequestValidationError::InvalidDuration(minutes))
        }
    }
}
