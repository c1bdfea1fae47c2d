use thiserror::Error;

/// Failures of a chat-completion call, before the reply content is interpreted
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatCompletionError {
    #[error("Request failed: {message}")]
    Transport { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl ChatCompletionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
