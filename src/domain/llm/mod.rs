//! Chat-completion wire models shared by the generator and its HTTP client

mod error;
mod message;
mod request;
mod response;

pub use error::ChatCompletionError;
pub use message::{ChatMessage, MessageRole};
pub use request::ChatCompletionRequest;
pub use response::{ChatCompletionResult, CompletionChoice, CompletionMessage, Usage};
