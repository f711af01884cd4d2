use serde::{Deserialize, Serialize};

use crate::domain::ResponseMethod;

pub const HOME_MESSAGE: &str = "Chatbot API is running. Use the /chat endpoint to interact.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by `POST /chat`.
///
/// Clients must tolerate a missing `response`; the widget substitutes its own
/// fallback text in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<ResponseMethod>,
}

impl ChatResponse {
    pub fn answered(response: impl Into<String>, method: ResponseMethod) -> Self {
        Self {
            response: Some(response.into()),
            method: Some(method),
        }
    }

    /// Reply text, treating an empty string the same as a missing field.
    pub fn reply_text(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self {
            message: HOME_MESSAGE.to_string(),
        }
    }
}
