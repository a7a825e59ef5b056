//! Send a batch of prompts to a local Ollama server or to the OpenAI API,
//! picking the backend from the model name, and get the reply text back.
//!
//! Also carries two helpers commonly needed around such calls:
//! [take_out_number] to read the final number out of an answer, and
//! [count_token] to measure a prompt in a model's tokens.
pub mod error;
pub mod logging;
pub mod prompting;
pub mod providers;
pub mod text_utils;
pub mod token_count;

pub use error::{LlmApiError, Result};
pub use logging::{LoggingConfig, LoggingConfigTrait};
pub use prompting::{PromptMessage, PromptMessageType};
pub use providers::{
    ollama::{OllamaClient, OllamaClientBuilder},
    openai::{OpenAiClient, OpenAiClientBuilder},
    Backend,
    ChatBackend,
};
pub use text_utils::take_out_number;
pub use token_count::{count_token, TokenCounter};

#[macro_use]
extern crate lazy_static;

/// Routes prompt batches to one of two injected chat backends.
///
/// `L` serves every model whose id does not contain `"gpt"`, `C` serves the rest.
#[derive(Debug, Clone)]
pub struct LlmApi<L = OllamaClient, C = OpenAiClient> {
    local: L,
    cloud: C,
    temperature: Option<f32>,
    _logging_config: LoggingConfig,
}

impl LlmApi {
    pub fn builder() -> LlmApiBuilder {
        LlmApiBuilder::default()
    }
}

impl<L: ChatBackend, C: ChatBackend> LlmApi<L, C> {
    pub fn new(local: L, cloud: C) -> Self {
        Self {
            local,
            cloud,
            temperature: None,
            _logging_config: LoggingConfig::default(),
        }
    }

    /// Sampling temperature sent with every request. `None` (the default)
    /// sends nothing and leaves it to the backend.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn cloud(&self) -> &C {
        &self.cloud
    }

    /// Sends each question as its own `user` turn, in order, to the backend
    /// picked by [Backend::from_model_id], and returns the reply text.
    pub async fn ask<T: AsRef<str>>(&self, questions: &[T], model: &str) -> Result<String> {
        self.ask_backend(Backend::from_model_id(model), questions, model)
            .await
    }

    /// Same as [LlmApi::ask] with the backend chosen by the caller.
    pub async fn ask_backend<T: AsRef<str>>(
        &self,
        backend: Backend,
        questions: &[T],
        model: &str,
    ) -> Result<String> {
        if questions.is_empty() {
            return Err(LlmApiError::EmptyPromptBatch);
        }
        let messages = prompting::user_turns(questions);
        tracing::debug!(%backend, model, turns = messages.len(), "dispatching prompt batch");

        let result = match backend {
            Backend::Local => self.local.chat(model, &messages, self.temperature).await,
            Backend::Cloud => self.cloud.chat(model, &messages, self.temperature).await,
        };
        if let Err(e) = &result {
            tracing::error!(%backend, model, error = %e, "prompt batch failed");
        }
        result
    }
}

pub struct LlmApiBuilder {
    pub ollama: OllamaClientBuilder,
    pub openai: OpenAiClientBuilder,
    pub temperature: Option<f32>,
    pub logging_config: LoggingConfig,
}

impl Default for LlmApiBuilder {
    fn default() -> Self {
        Self {
            ollama: OllamaClientBuilder::default(),
            openai: OpenAiClientBuilder::default(),
            temperature: None,
            logging_config: LoggingConfig::default(),
        }
    }
}

impl LlmApiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base url of the local Ollama server. Default `http://localhost:11435`.
    pub fn ollama_host<S: Into<String>>(mut self, host: S) -> Self {
        self.ollama = self.ollama.host(host);
        self
    }

    /// OpenAI API key. Otherwise `OPENAI_API_KEY` is read from the environment or `.env`.
    /// Without either, local models still work and cloud models fail with `ApiKey`.
    pub fn openai_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.openai = self.openai.api_key(api_key);
        self
    }

    pub fn openai_api_key_env_var<S: Into<String>>(mut self, api_key_env_var: S) -> Self {
        self.openai = self.openai.api_key_env_var(api_key_env_var);
        self
    }

    pub fn openai_api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.openai = self.openai.api_base(api_base);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn init(mut self) -> Result<LlmApi> {
        self.logging_config.load_logger()?;
        let local = self.ollama.init();
        let cloud = self.openai.init();
        Ok(LlmApi {
            local,
            cloud,
            temperature: self.temperature,
            _logging_config: self.logging_config,
        })
    }
}

impl LoggingConfigTrait for LlmApiBuilder {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        &mut self.logging_config
    }
}
