use super::{
    client::Client,
    config::Config,
    error::OllamaApiError,
    types::{OllamaChatRequest, OllamaChatResponse},
};

pub struct Chat<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Chat<'c, C> {
    pub fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Sends a non-streaming chat request to `/api/chat`.
    pub async fn create(
        &self,
        request: OllamaChatRequest,
    ) -> Result<OllamaChatResponse, OllamaApiError> {
        if request.stream != Some(false) {
            // The server streams by default; only single-object replies are parsed.
            return Err(OllamaApiError::InvalidArgument(
                "stream must be explicitly set to false".into(),
            ));
        }
        if request.model.is_empty() {
            return Err(OllamaApiError::InvalidArgument("model is empty".into()));
        }
        self.client.post("/api/chat", request).await
    }
}
