//! Chat-completion transport

mod chat_completion;
mod http_client;

pub use chat_completion::{ChatCompletionClient, DEFAULT_CHAT_COMPLETIONS_URL};
pub use http_client::{HttpClient, HttpClientTrait, HttpResponse};

#[cfg(test)]
pub use http_client::mock::{MockHttpClient, RecordedRequest};
