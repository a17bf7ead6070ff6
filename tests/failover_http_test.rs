//! End-to-end failover tests against mock HTTP backends

use folio::prelude::*;
use folio::providers::openai::OpenAIConfig;
use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion_body(content: &str, model: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
    })
}

fn quota_body() -> serde_json::Value {
    json!({
        "error": {
            "message": "You exceeded your current quota, please check your plan and billing details.",
            "type": "insufficient_quota",
            "code": "insufficient_quota"
        }
    })
}

fn failover_over(primary: &MockServer, secondary: &MockServer) -> Failover<OpenAI, OpenAI> {
    let primary_backend =
        OpenAI::from_config(OpenAIConfig::new("sk-primary").with_base_url(primary.uri()))
            .expect("primary backend");

    let secondary_url = secondary.uri();
    Failover::new(primary_backend, "gpt-4o-mini", "deepseek-chat", move || {
        OpenAI::from_config(OpenAIConfig::new("sk-secondary").with_base_url(secondary_url.clone()))
    })
}

#[tokio::test]
async fn quota_exhaustion_fails_over_to_secondary() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_json(quota_body()),
        )
        .expect(1)
        .mount(&primary)
        .await;

    // The secondary must be asked for its own model, not the primary's
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "deepseek-chat"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_body("Grounded answer.", "deepseek-chat")),
        )
        .expect(2)
        .mount(&secondary)
        .await;

    let failover = failover_over(&primary, &secondary);
    let request = Request::new(vec![Message::user("What does the contract say?")], "unset");

    let response = failover.request(request.clone()).await.unwrap();
    assert_eq!(response.content, "Grounded answer.");
    assert_eq!(failover.active_backend(), Backend::Secondary);
    assert_eq!(failover.active_model().to_string(), "deepseek-chat");

    // A second call goes straight to the secondary; the primary's expect(1)
    // verifies it was never called again
    let response = failover.request(request).await.unwrap();
    assert_eq!(response.content, "Grounded answer.");
}

#[tokio::test]
async fn auth_failure_propagates_without_failover() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&secondary)
        .await;

    let failover = failover_over(&primary, &secondary);
    let request = Request::new(vec![Message::user("hello")], "unset");

    let error = failover.request(request).await.unwrap_err();
    assert!(matches!(error, Error::Authentication(_)));
    assert_eq!(failover.active_backend(), Backend::Primary);
}

#[tokio::test]
async fn streaming_fails_over_before_any_output() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(quota_body()))
        .expect(1)
        .mount(&primary)
        .await;

    let sse_body = concat!(
        "data: {\"id\":\"chatcmpl-s\",\"model\":\"deepseek-chat\",\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
        "data: {\"id\":\"chatcmpl-s\",\"model\":\"deepseek-chat\",\"choices\":[{\"delta\":{\"content\":\"Once\"}}]}\n\n",
        "data: {\"id\":\"chatcmpl-s\",\"model\":\"deepseek-chat\",\"choices\":[{\"delta\":{\"content\":\" upon\"}}]}\n\n",
        "data: {\"id\":\"chatcmpl-s\",\"model\":\"deepseek-chat\",\"choices\":[{\"delta\":{\"content\":\" a time\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"))
        .expect(1)
        .mount(&secondary)
        .await;

    let failover = failover_over(&primary, &secondary);
    let request = Request::new(vec![Message::user("Tell me a story")], "unset");

    let mut stream = failover.stream(request).await.unwrap();
    let mut acc = StreamAccumulator::new();
    while let Some(event) = stream.next().await {
        acc.process_event(event.unwrap());
    }

    assert_eq!(acc.content(), "Once upon a time");
    assert_eq!(failover.active_backend(), Backend::Secondary);
}

#[tokio::test]
async fn streaming_happy_path_stays_on_primary() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;

    let sse_body = concat!(
        "data: {\"id\":\"chatcmpl-p\",\"model\":\"gpt-4o-mini\",\"choices\":[{\"delta\":{\"content\":\"All\"}}]}\n\n",
        "data: {\"id\":\"chatcmpl-p\",\"model\":\"gpt-4o-mini\",\"choices\":[{\"delta\":{\"content\":\" good\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"))
        .expect(1)
        .mount(&primary)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&secondary)
        .await;

    let failover = failover_over(&primary, &secondary);
    let request = Request::new(vec![Message::user("status?")], "unset");

    let mut stream = failover.stream(request).await.unwrap();
    let mut acc = StreamAccumulator::new();
    while let Some(event) = stream.next().await {
        acc.process_event(event.unwrap());
    }

    assert_eq!(acc.content(), "All good");
    assert_eq!(failover.active_backend(), Backend::Primary);
}
