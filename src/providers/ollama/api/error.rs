use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum OllamaApiError {
    /// Underlying error from reqwest library after an API call was made
    #[error("http error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Server returned a non-success status, with its error text when it sent one
    #[error("api error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("failed to serialize api request: {0}")]
    JSONSerialize(serde_json::Error),
    /// Error when a response cannot be deserialized into a Rust type
    #[error("failed to deserialize api response: {0}")]
    JSONDeserialize(serde_json::Error),
    /// Error from client side validation
    /// or when builder fails to build request before making API call
    #[error("invalid args: {0}")]
    InvalidArgument(String),
}

/// Ollama reports failures as `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct WrappedError {
    pub(crate) error: String,
}

pub(crate) fn map_deserialization_error(e: serde_json::Error, bytes: &[u8]) -> OllamaApiError {
    tracing::error!(
        "failed deserialization of: {}",
        String::from_utf8_lossy(bytes)
    );
    OllamaApiError::JSONDeserialize(e)
}

pub(crate) fn map_serialization_error(e: serde_json::Error) -> OllamaApiError {
    tracing::error!("failed serialization: {}", e);
    OllamaApiError::JSONSerialize(e)
}
