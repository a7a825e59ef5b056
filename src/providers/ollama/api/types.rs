//! Request and response bodies of the Ollama `/api/chat` endpoint.
use derive_builder::{Builder, UninitializedFieldError};
use serde::{Deserialize, Serialize};

use super::error::OllamaApiError;
use crate::prompting::PromptMessage;

impl From<UninitializedFieldError> for OllamaApiError {
    fn from(value: UninitializedFieldError) -> Self {
        OllamaApiError::InvalidArgument(value.to_string())
    }
}

#[derive(Clone, Serialize, Default, Debug, Builder, PartialEq)]
#[builder(name = "OllamaChatRequestArgs")]
#[builder(pattern = "mutable")]
#[builder(setter(into, strip_option), default)]
#[builder(derive(Debug))]
#[builder(build_fn(error = "OllamaApiError"))]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
}

/// Sampling options. Unset fields are left to the server's model defaults.
#[derive(Clone, Serialize, Default, Debug, PartialEq)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct OllamaChatResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    /// Absent when the server answers with something other than a chat reply.
    #[serde(default)]
    pub message: Option<PromptMessage>,
    #[serde(default)]
    pub done: bool,
    pub total_duration: Option<u64>,
    pub prompt_eval_count: Option<u64>,
    pub eval_count: Option<u64>,
}
