mod dispatch;
mod openai;

pub use httpmock::prelude::*;
pub use llm_api::*;
pub use serde_json::json;
pub use serial_test::serial;

/// A dispatcher whose two backends both point at `server`.
pub fn api_for(server: &MockServer) -> LlmApi {
    LlmApi::builder()
        .ollama_host(server.base_url())
        .openai_api_base(server.base_url())
        .openai_api_key("sk-test")
        .init()
        .unwrap()
}

pub fn ollama_reply(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3",
        "created_at": "2024-05-01T10:00:00.000000Z",
        "message": {"role": "assistant", "content": content},
        "done_reason": "stop",
        "done": true,
        "total_duration": 1_000_000,
        "prompt_eval_count": 12,
        "eval_count": 4
    })
}

pub fn openai_reply(choices: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4-0613",
        "choices": choices,
        "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
    })
}
