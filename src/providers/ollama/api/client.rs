use bytes::Bytes;

use serde::{de::DeserializeOwned, Serialize};

use super::config::{Config, OllamaConfig};
use super::error::{
    map_deserialization_error,
    map_serialization_error,
    OllamaApiError,
    WrappedError,
};
use super::Chat;

#[derive(Debug, Clone)]
/// Client is a container for config and http_client
/// used to make API calls.
pub struct Client<C: Config> {
    http_client: reqwest::Client,
    config: C,
}

impl Default for Client<OllamaConfig> {
    fn default() -> Self {
        Self::new()
    }
}

impl Client<OllamaConfig> {
    /// Client with default [OllamaConfig]
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config: OllamaConfig::default(),
        }
    }
}

impl<C: Config> Client<C> {
    pub fn with_config(config: C) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Provide your own [client] to make HTTP requests with.
    ///
    /// [client]: reqwest::Client
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    // API groups

    /// To call [Chat] group related APIs using this client.
    pub fn chat(&self) -> Chat<C> {
        Chat::new(self)
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Make a POST request to {path} and deserialize the response body
    pub(crate) async fn post<I, O>(&self, path: &str, request: I) -> Result<O, OllamaApiError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let body = serde_json::to_vec(&request).map_err(map_serialization_error)?;
        let request = self
            .http_client
            .post(self.config.url(path))
            .query(&self.config.query())
            .headers(self.config.headers())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .build()?;

        self.execute(request).await
    }

    /// Execute a HTTP request once. Failures are returned as is.
    async fn execute_raw(&self, request: reqwest::Request) -> Result<Bytes, OllamaApiError> {
        let response = self.http_client.execute(request).await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // The body is usually `{"error": "..."}`, but proxies in front of
            // the service may answer with plain text.
            let message = match serde_json::from_slice::<WrappedError>(bytes.as_ref()) {
                Ok(wrapped_error) => wrapped_error.error,
                Err(_) => String::from_utf8_lossy(bytes.as_ref()).trim().to_string(),
            };
            tracing::warn!(status = status.as_u16(), %message, "ollama request failed");
            return Err(OllamaApiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes)
    }

    async fn execute<O>(&self, request: reqwest::Request) -> Result<O, OllamaApiError>
    where
        O: DeserializeOwned,
    {
        let bytes = self.execute_raw(request).await?;

        let response: O = serde_json::from_slice(bytes.as_ref())
            .map_err(|e| map_deserialization_error(e, bytes.as_ref()))?;

        Ok(response)
    }
}
