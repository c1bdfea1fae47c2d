use thiserror::Error;

use super::FormatError;
use crate::domain::llm::ChatCompletionError;

/// Failures of a single lesson-plan generation
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request to the AI provider failed: {message}")]
    Transport { message: String },

    #[error("AI provider request failed with status {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("No content returned from the AI provider")]
    EmptyReply,

    #[error("AI provider returned an unreadable response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid response format from the AI provider")]
    UpstreamFormat {
        raw_content: String,
        #[source]
        source: FormatError,
    },
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn upstream_http(status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamHttp {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn upstream_format(raw_content: impl Into<String>, source: FormatError) -> Self {
        Self::UpstreamFormat {
            raw_content: raw_content.into(),
            source,
        }
    }

    /// Short machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "upstream_unreachable",
            Self::UpstreamHttp { .. } => "upstream_http_error",
            Self::EmptyReply => "upstream_empty_reply",
            Self::InvalidResponse { .. } => "upstream_invalid_response",
            Self::UpstreamFormat { .. } => "upstream_format_error",
        }
    }

    /// Upstream HTTP status, when the provider answered with one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Model reply kept for diagnostics when it could not be parsed
    pub fn raw_content(&self) -> Option<&str> {
        match self {
            Self::UpstreamFormat { raw_content, .. } => Some(raw_content),
            _ => None,
        }
    }
}

impl From<ChatCompletionError> for GenerationError {
    fn from(err: ChatCompletionError) -> Self {
        match err {
            ChatCompletionError::Transport { message } => Self::Transport { message },
            ChatCompletionError::Http { status, body } => Self::UpstreamHttp { status, body },
            ChatCompletionError::Decode { message } => Self::InvalidResponse { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lesson_plan::parse_structured_reply;

    #[test]
    fn test_from_chat_completion_error() {
        let err: GenerationError = ChatCompletionError::http(503, "overloaded").into();
        assert_eq!(err.upstream_status(), Some(503));

        let err: GenerationError = ChatCompletionError::transport("connection reset").into();
        assert!(matches!(err, GenerationError::Transport { .. }));

        let err: GenerationError = ChatCompletionError::decode("expected value").into();
        assert_eq!(err.code(), "upstream_invalid_response");
    }

    #[test]
    fn test_upstream_http_message() {
        let err = GenerationError::upstream_http(429, r#"{"error":"rate limited"}"#);
        assert_eq!(
            err.to_string(),
            r#"AI provider request failed with status 429: {"error":"rate limited"}"#
        );
        assert_eq!(err.upstream_status(), Some(429));
        assert_eq!(err.code(), "upstream_http_error");
    }

    #[test]
    fn test_format_error_keeps_raw_content() {
        let source = parse_structured_reply("not json").unwrap_err();
        let err = GenerationError::upstream_format("not json", source);

        assert_eq!(err.raw_content(), Some("not json"));
        assert_eq!(err.to_string(), "Invalid response format from the AI provider");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_empty_reply() {
        let err = GenerationError::EmptyReply;
        assert_eq!(err.to_string(), "No content returned from the AI provider");
        assert_eq!(err.upstream_status(), None);
        assert_eq!(err.raw_content(), None);
    }
}
