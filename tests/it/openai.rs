use crate::*;

fn client_for(server: &MockServer) -> OpenAiClient {
    OpenAiClient::builder()
        .api_base(server.base_url())
        .api_key("sk-test")
        .init()
}

#[tokio::test]
async fn returns_first_choice_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test");
            then.status(200).json_body(openai_reply(json!([
                {"index": 0, "message": {"role": "assistant", "content": "Paris"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "Lyon"}, "finish_reason": "stop"}
            ])));
        })
        .await;

    let reply = client_for(&server)
        .chat(
            "gpt-4",
            &[PromptMessage::user("Capital of France?")],
            None,
        )
        .await
        .unwrap();

    assert_eq!(reply, "Paris");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_choices_is_response_shape() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(openai_reply(json!([])));
        })
        .await;

    let result = client_for(&server)
        .chat("gpt-4", &[PromptMessage::user("hi")], None)
        .await;

    assert!(matches!(
        result,
        Err(LlmApiError::ResponseShape {
            backend: Backend::Cloud,
            ..
        })
    ));
}

#[tokio::test]
async fn auth_failure_is_backend_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({
                "error": {
                    "message": "Incorrect API key provided: sk-test.",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            }));
        })
        .await;

    let result = client_for(&server)
        .chat("gpt-4", &[PromptMessage::user("hi")], None)
        .await;

    match result {
        Err(LlmApiError::BackendUnavailable { backend, message }) => {
            assert_eq!(backend, Backend::Cloud);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_api_is_backend_unavailable() {
    let client = OpenAiClient::builder()
        .api_base("http://127.0.0.1:9")
        .api_key("sk-test")
        .init();
    let result = client
        .chat("gpt-4", &[PromptMessage::user("hi")], None)
        .await;

    assert!(matches!(
        result,
        Err(LlmApiError::BackendUnavailable {
            backend: Backend::Cloud,
            ..
        })
    ));
}
