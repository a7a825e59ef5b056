use crate::{LlmApiError, Result};
use std::fmt;
use tiktoken_rs::{get_bpe_from_model, CoreBPE};

/// The tiktoken encoding registered for one model.
///
/// Building the BPE tables is the expensive part of counting, so hold on to
/// one of these when counting many prompts for the same model.
pub struct TokenCounter {
    model_id: String,
    tokenizer: CoreBPE,
}

impl fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCounter")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}

impl TokenCounter {
    /// Looks up the encoding for `model_id` (e.g. `gpt-4`, `gpt-3.5-turbo-0613`).
    pub fn new<T: AsRef<str>>(model_id: T) -> Result<Self> {
        let model_id = model_id.as_ref();
        let tokenizer = get_bpe_from_model(model_id).map_err(|e| {
            tracing::debug!(model_id, error = %e, "no tiktoken encoding for model");
            LlmApiError::UnknownModelTokenizer {
                model: model_id.to_string(),
            }
        })?;
        Ok(Self {
            model_id: model_id.to_string(),
            tokenizer,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Special-token text such as `<|endoftext|>` is counted as ordinary text.
    pub fn count_tokens(&self, prompt: &str) -> usize {
        self.tokenizer.encode_ordinary(prompt).len()
    }
}

/// Number of tokens `prompt` takes up for `model`.
pub fn count_token<T: AsRef<str>>(model: T, prompt: &str) -> Result<usize> {
    Ok(TokenCounter::new(model)?.count_tokens(prompt))
}
