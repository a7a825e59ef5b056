pub mod api;

use super::{Backend, ChatBackend};
use crate::{prompting::PromptMessage, LlmApiError, Result};
use api::{
    client::Client,
    config::{OllamaConfig, OLLAMA_API_BASE},
    error::OllamaApiError,
    types::{OllamaChatRequestArgs, OllamaOptions},
};

/// Chat client for a locally hosted Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client<OllamaConfig>,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl OllamaClient {
    pub fn builder() -> OllamaClientBuilder {
        OllamaClientBuilder::default()
    }

    pub fn api_base(&self) -> &str {
        use api::config::Config;
        self.client.config().api_base()
    }
}

impl ChatBackend for OllamaClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[PromptMessage],
        temperature: Option<f32>,
    ) -> Result<String> {
        let mut request_builder = OllamaChatRequestArgs::default();
        request_builder
            .model(model)
            .messages(messages.to_vec())
            .stream(false);
        if temperature.is_some() {
            request_builder.options(OllamaOptions { temperature });
        }
        let request = request_builder.build().map_err(LlmApiError::from)?;
        tracing::trace!(?request);

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(LlmApiError::from)?;
        tracing::trace!(?response);

        match response.message {
            Some(message) => Ok(message.content),
            None => Err(LlmApiError::ResponseShape {
                backend: Backend::Local,
                message: "response has no message field".to_string(),
            }),
        }
    }
}

impl From<OllamaApiError> for LlmApiError {
    fn from(error: OllamaApiError) -> Self {
        match error {
            OllamaApiError::Reqwest(e) => LlmApiError::BackendUnavailable {
                backend: Backend::Local,
                message: e.to_string(),
            },
            e @ OllamaApiError::ApiError { .. } => LlmApiError::BackendUnavailable {
                backend: Backend::Local,
                message: e.to_string(),
            },
            OllamaApiError::JSONDeserialize(e) => LlmApiError::ResponseShape {
                backend: Backend::Local,
                message: e.to_string(),
            },
            e @ (OllamaApiError::JSONSerialize(_) | OllamaApiError::InvalidArgument(_)) => {
                LlmApiError::RequestBuilder(format!("OllamaClient builder error: {}", e))
            }
        }
    }
}

pub struct OllamaClientBuilder {
    pub host: String,
    pub http_client: Option<reqwest::Client>,
}

impl Default for OllamaClientBuilder {
    fn default() -> Self {
        OllamaClientBuilder {
            host: OLLAMA_API_BASE.to_string(),
            http_client: None,
        }
    }
}

impl OllamaClientBuilder {
    pub fn new() -> Self {
        OllamaClientBuilder::default()
    }

    /// Base url of the server, e.g. `http://localhost:11434`.
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn init(self) -> OllamaClient {
        let config = OllamaConfig::new().with_api_base(self.host);
        let mut client = Client::with_config(config);
        if let Some(http_client) = self.http_client {
            client = client.with_http_client(http_client);
        }
        OllamaClient { client }
    }
}
