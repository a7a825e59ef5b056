use serde::{Deserialize, Serialize};

/// The sender of a chat message.
///
/// Only `User` is produced by [`user_turns`]; the other variants exist so
/// replies from either backend deserialize into the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMessageType {
    System,
    User,
    Assistant,
    Tool,
}

impl PromptMessageType {
    pub fn as_str(&self) -> &str {
        match self {
            PromptMessageType::System => "system",
            PromptMessageType::User => "user",
            PromptMessageType::Assistant => "assistant",
            PromptMessageType::Tool => "tool",
        }
    }
}

impl std::fmt::Display for PromptMessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role/content pair as both chat APIs expect it on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptMessageType,
    #[serde(default)]
    pub content: String,
}

impl PromptMessage {
    pub fn user<T: Into<String>>(content: T) -> Self {
        Self {
            role: PromptMessageType::User,
            content: content.into(),
        }
    }
}

/// Turns a prompt batch into one `user` message per prompt, preserving order.
pub fn user_turns<T: AsRef<str>>(prompts: &[T]) -> Vec<PromptMessage> {
    prompts
        .iter()
        .map(|prompt| PromptMessage::user(prompt.as_ref()))
        .collect()
}
