pub mod ollama;
pub mod openai;

use crate::{prompting::PromptMessage, Result};
use std::future::Future;

/// Marker in a model id that routes the request to the cloud API.
pub const CLOUD_MODEL_MARKER: &str = "gpt";

/// Which service a request is sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// The chat server running next to us (Ollama).
    Local,
    /// The hosted OpenAI chat-completions API.
    Cloud,
}

impl Backend {
    /// Any model id containing `"gpt"` goes to the cloud, everything else stays local.
    pub fn from_model_id<T: AsRef<str>>(model_id: T) -> Self {
        if model_id.as_ref().contains(CLOUD_MODEL_MARKER) {
            Backend::Cloud
        } else {
            Backend::Local
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Local => f.write_str("local"),
            Backend::Cloud => f.write_str("cloud"),
        }
    }
}

/// A chat service that turns a list of messages into one reply.
///
/// Implemented by [ollama::OllamaClient] and [openai::OpenAiClient]; tests plug
/// in their own implementations to observe routing without a network.
pub trait ChatBackend: Send + Sync {
    /// Sends `messages` to `model` and returns the generated text.
    ///
    /// `temperature` is forwarded only when set.
    fn chat(
        &self,
        model: &str,
        messages: &[PromptMessage],
        temperature: Option<f32>,
    ) -> impl Future<Output = Result<String>> + Send;
}
