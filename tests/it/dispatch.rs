use crate::*;

#[tokio::test]
async fn gpt_model_goes_to_openai_only() {
    let server = MockServer::start_async().await;
    let cloud = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body_partial(r#"{"model": "gpt-4"}"#);
            then.status(200).json_body(openai_reply(json!([
                {"index": 0, "message": {"role": "assistant", "content": "4"}, "finish_reason": "stop"}
            ])));
        })
        .await;
    let local = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).json_body(ollama_reply("wrong backend"));
        })
        .await;

    let api = api_for(&server);
    let answer = api.ask(&["What is 2 + 2?"], "gpt-4").await.unwrap();

    assert_eq!(answer, "4");
    cloud.assert_async().await;
    local.assert_hits_async(0).await;
}

#[tokio::test]
async fn other_model_goes_to_ollama_only() {
    let server = MockServer::start_async().await;
    let local = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat").json_body(json!({
                "model": "llama3",
                "messages": [
                    {"role": "user", "content": "Tom has 3 apples."},
                    {"role": "user", "content": "He buys 4 more. How many now?"}
                ],
                "stream": false
            }));
            then.status(200)
                .json_body(ollama_reply("First 3, then 3 + 4 = 7. The answer is 7"));
        })
        .await;
    let cloud = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500);
        })
        .await;

    let api = api_for(&server);
    let answer = api
        .ask(
            &["Tom has 3 apples.", "He buys 4 more. How many now?"],
            "llama3",
        )
        .await
        .unwrap();

    assert_eq!(take_out_number(&answer).unwrap(), 7);
    local.assert_async().await;
    cloud.assert_hits_async(0).await;
}

#[tokio::test]
async fn temperature_reaches_both_backends() {
    let server = MockServer::start_async().await;
    let local = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body_partial(r#"{"options": {"temperature": 0.0}}"#);
            then.status(200).json_body(ollama_reply("ok"));
        })
        .await;
    let cloud = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .json_body_partial(r#"{"temperature": 0.0}"#);
            then.status(200).json_body(openai_reply(json!([
                {"index": 0, "message": {"role": "assistant", "content": "ok"}, "finish_reason": "stop"}
            ])));
        })
        .await;

    let api = LlmApi::builder()
        .ollama_host(server.base_url())
        .openai_api_base(server.base_url())
        .openai_api_key("sk-test")
        .temperature(0.0)
        .init()
        .unwrap();
    assert_eq!(api.temperature(), Some(0.0));

    api.ask(&["hi"], "llama3").await.unwrap();
    api.ask(&["hi"], "gpt-3.5-turbo").await.unwrap();

    local.assert_async().await;
    cloud.assert_async().await;
}

#[tokio::test]
async fn empty_batch_sends_nothing() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200);
        })
        .await;

    let api = api_for(&server);
    let questions: Vec<String> = vec![];
    let result = api.ask(&questions, "llama3").await;

    assert!(matches!(result, Err(LlmApiError::EmptyPromptBatch)));
    any.assert_hits_async(0).await;
}

#[test]
#[serial]
fn api_key_from_environment() {
    std::env::set_var("LLM_API_IT_OPENAI_KEY", "sk-from-env");
    let api = LlmApi::builder()
        .openai_api_key_env_var("LLM_API_IT_OPENAI_KEY")
        .init();
    std::env::remove_var("LLM_API_IT_OPENAI_KEY");
    assert!(api.unwrap().cloud().has_api_key());
}

#[tokio::test]
#[serial]
async fn keyless_dispatcher_serves_local_models_only() {
    std::env::remove_var("LLM_API_IT_OPENAI_KEY");
    let server = MockServer::start_async().await;
    let local = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).json_body(ollama_reply("4"));
        })
        .await;
    let cloud = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200);
        })
        .await;

    let api = LlmApi::builder()
        .ollama_host(server.base_url())
        .openai_api_base(server.base_url())
        .openai_api_key_env_var("LLM_API_IT_OPENAI_KEY")
        .init()
        .unwrap();
    assert!(!api.cloud().has_api_key());

    assert_eq!(api.ask(&["What is 2 + 2?"], "llama3").await.unwrap(), "4");
    let result = api.ask(&["What is 2 + 2?"], "gpt-4").await;
    assert!(matches!(result, Err(LlmApiError::ApiKey(_))));

    local.assert_hits_async(1).await;
    cloud.assert_hits_async(0).await;
}
