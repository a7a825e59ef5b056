//! Client configuration for the Ollama HTTP API.
use reqwest::header::HeaderMap;
use serde::Deserialize;

/// Address the local chat service listens on unless told otherwise.
pub const OLLAMA_API_BASE: &str = "http://localhost:11435";

/// [super::Client] relies on this for every call it makes.
pub trait Config: Clone {
    fn headers(&self) -> HeaderMap;
    fn url(&self, path: &str) -> String;
    fn query(&self) -> Vec<(&str, &str)>;

    fn api_base(&self) -> &str;
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    api_base: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_base: OLLAMA_API_BASE.to_string(),
        }
    }
}

impl OllamaConfig {
    /// Config pointing at [OLLAMA_API_BASE].
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl Config for OllamaConfig {
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn query(&self) -> Vec<(&str, &str)> {
        vec![]
    }
}
