use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{ChatRequest, ChatResponse};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {endpoint} is not valid JSON: {source}")]
    Decode {
        endpoint: Url,
        #[source]
        source: serde_json::Error,
    },
}

/// One request/response exchange with the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn exchange(&self, message: &str) -> Result<ChatResponse, TransportError>;
}

/// POSTs `{"message": ...}` as JSON and decodes the reply body.
///
/// The status code is not inspected: any JSON body is accepted and a body
/// without `response` is handled by the caller. No timeout is set.
/// Only `response` is read strictly; a `method` the client does not know
/// is dropped.
pub struct HttpChatTransport {
    http: Client,
    endpoint: Url,
}

impl HttpChatTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn exchange(&self, message: &str) -> Result<ChatResponse, TransportError> {
        let request_error = |source: reqwest::Error| TransportError::Request {
            endpoint: self.endpoint.clone(),
            source,
        };

        let body = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(request_error)?
            .bytes()
            .await
            .map_err(request_error)?;

        let value: Value =
            serde_json::from_slice(&body).map_err(|source| TransportError::Decode {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        Ok(lenient_reply(&value))
    }
}

fn lenient_reply(value: &Value) -> ChatResponse {
    ChatResponse {
        response: value
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string),
        method: value
            .get("method")
            .and_then(|method| serde_json::from_value(method.clone()).ok()),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
