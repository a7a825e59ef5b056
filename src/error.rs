use crate::Backend;

pub type Result<T, E = LlmApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum LlmApiError {
    /// `ask` was called without any prompts.
    #[error("prompt batch is empty")]
    EmptyPromptBatch,
    /// Transport, auth or server-side failure from the selected backend.
    #[error("{backend} backend unavailable: {message}")]
    BackendUnavailable { backend: Backend, message: String },
    /// The backend answered, but not with the envelope we expected.
    #[error("unexpected {backend} response: {message}")]
    ResponseShape { backend: Backend, message: String },
    /// Request arguments rejected before anything was sent.
    #[error("request builder error: {0}")]
    RequestBuilder(String),
    #[error("api key error: {0}")]
    ApiKey(String),
    #[error("no number found in answer")]
    NoNumberFound,
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),
    #[error("no tokenizer registered for model: {model}")]
    UnknownModelTokenizer { model: String },
    #[error("logging setup failed: {0}")]
    Logging(String),
}
