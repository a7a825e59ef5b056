use super::{Backend, ChatBackend};
use crate::{prompting::PromptMessage, prompting::PromptMessageType, LlmApiError, Result};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use secrecy::{ExposeSecret, Secret};
use tracing::{debug, info, span, warn, Level};

pub const ENV_VAR_NAME: &str = "OPENAI_API_KEY";
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat client for the hosted OpenAI API.
///
/// Built without an API key, it still constructs; every chat call then fails
/// with [LlmApiError::ApiKey] and no request is sent.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Option<Client<OpenAIConfig>>,
    api_key_env_var: String,
}

impl OpenAiClient {
    pub fn builder() -> OpenAiClientBuilder {
        OpenAiClientBuilder::default()
    }

    pub fn has_api_key(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Client<OpenAIConfig>> {
        self.client.as_ref().ok_or_else(|| {
            LlmApiError::ApiKey(format!(
                "no OpenAI api key: pass one to the builder or set {}",
                self.api_key_env_var
            ))
        })
    }

    fn request_messages(messages: &[PromptMessage]) -> Result<Vec<ChatCompletionRequestMessage>> {
        messages
            .iter()
            .map(|m| {
                let message: ChatCompletionRequestMessage = match m.role {
                    PromptMessageType::System => ChatCompletionRequestSystemMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map_err(LlmApiError::from)?
                        .into(),
                    PromptMessageType::User => ChatCompletionRequestUserMessageArgs::default()
                        .content(m.content.clone())
                        .build()
                        .map_err(LlmApiError::from)?
                        .into(),
                    PromptMessageType::Assistant => {
                        ChatCompletionRequestAssistantMessageArgs::default()
                            .content(m.content.clone())
                            .build()
                            .map_err(LlmApiError::from)?
                            .into()
                    }
                    PromptMessageType::Tool => {
                        return Err(LlmApiError::RequestBuilder(
                            "tool messages are not sent by this client".to_string(),
                        ))
                    }
                };
                Ok(message)
            })
            .collect()
    }

    /// Pulls the text of the first choice out of a completion.
    fn first_choice_content(completion: CreateChatCompletionResponse) -> Result<String> {
        let choice =
            completion
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| LlmApiError::ResponseShape {
                    backend: Backend::Cloud,
                    message: "completion has no choices".to_string(),
                })?;
        choice
            .message
            .content
            .ok_or_else(|| LlmApiError::ResponseShape {
                backend: Backend::Cloud,
                message: "first choice has no message content".to_string(),
            })
    }
}

impl ChatBackend for OpenAiClient {
    async fn chat(
        &self,
        model: &str,
        messages: &[PromptMessage],
        temperature: Option<f32>,
    ) -> Result<String> {
        let client = self.client()?;
        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(model)
            .messages(Self::request_messages(messages)?);
        if let Some(temperature) = temperature {
            request_builder.temperature(temperature);
        }
        let request = request_builder.build().map_err(LlmApiError::from)?;
        tracing::trace!(?request);

        let completion = client
            .chat()
            .create(request)
            .await
            .map_err(LlmApiError::from)?;
        tracing::trace!(?completion);

        Self::first_choice_content(completion)
    }
}

impl From<OpenAIError> for LlmApiError {
    fn from(error: OpenAIError) -> Self {
        match error {
            OpenAIError::JSONDeserialize(e) => LlmApiError::ResponseShape {
                backend: Backend::Cloud,
                message: e.to_string(),
            },
            OpenAIError::InvalidArgument(e) => {
                LlmApiError::RequestBuilder(format!("OpenAiClient builder error: {}", e))
            }
            e => LlmApiError::BackendUnavailable {
                backend: Backend::Cloud,
                message: e.to_string(),
            },
        }
    }
}

pub struct OpenAiClientBuilder {
    pub api_key: Option<Secret<String>>,
    pub api_key_env_var: String,
    pub api_base: String,
}

impl Default for OpenAiClientBuilder {
    fn default() -> Self {
        OpenAiClientBuilder {
            api_key: None,
            api_key_env_var: ENV_VAR_NAME.to_string(),
            api_base: OPENAI_API_BASE.to_string(),
        }
    }
}

impl OpenAiClientBuilder {
    pub fn new() -> Self {
        OpenAiClientBuilder::default()
    }

    /// Set the API key for the client. Otherwise it will attempt to load it from the .env file.
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Set the environment variable name for the API key. Default is `OPENAI_API_KEY`.
    pub fn api_key_env_var<S: Into<String>>(mut self, api_key_env_var: S) -> Self {
        self.api_key_env_var = api_key_env_var.into();
        self
    }

    pub fn api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn load_api_key(&self) -> Result<Secret<String>> {
        let span = span!(Level::INFO, "load_api_key");
        let _enter = span.enter();

        if let Some(api_key) = &self.api_key {
            debug!("Using api_key from parameter");
            return Ok(api_key.clone());
        }
        info!("api_key not set. Attempting to load from .env");
        dotenv::dotenv().ok();

        match dotenv::var(&self.api_key_env_var) {
            Ok(api_key) => {
                debug!("Successfully loaded api_key from .env");
                Ok(Secret::new(api_key))
            }
            Err(_) => {
                warn!(
                    "{} not found in dotenv, nor was it set manually. Cloud requests will fail",
                    self.api_key_env_var
                );
                Err(LlmApiError::ApiKey(format!(
                    "Failed to load {} from parameter or .env",
                    self.api_key_env_var
                )))
            }
        }
    }

    /// A missing key is not an error here, only once a cloud model is asked.
    pub fn init(self) -> OpenAiClient {
        let client = self.load_api_key().ok().map(|api_key| {
            // Rate limited requests fail on the first attempt instead of being retried.
            let backoff = backoff::ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(std::time::Duration::ZERO))
                .build();
            let config = OpenAIConfig::new()
                .with_api_key(api_key.expose_secret())
                .with_api_base(&self.api_base);
            Client::with_config(config).with_backoff(backoff)
        });
        OpenAiClient {
            client,
            api_key_env_var: self.api_key_env_var,
        }
    }
}
