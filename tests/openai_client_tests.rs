use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use flirtlink::{ChatMessage, CompletionClient, OpenAiClient, OpenAiConfig};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

/// Starts a fake completions endpoint answering with `status` and `body`.
async fn fake_api(status: StatusCode, body: Value) -> (String, Captured) {
    let captured = Captured::default();

    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, Json(request): Json<Value>| {
                    let body = body.clone();
                    async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        captured.requests.lock().unwrap().push((auth, request));
                        (status, Json(body))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn sends_model_limits_and_messages_with_bearer_auth() {
    let (base_url, captured) = fake_api(StatusCode::OK, reply("hey there")).await;
    let client = OpenAiClient::new(
        OpenAiConfig::new("sk-test")
            .with_base_url(base_url)
            .with_model("gpt-4o-mini")
            .with_max_tokens(64)
            .with_temperature(Some(0.5)),
    );

    let content = client
        .complete(&[ChatMessage::user("Personality:\nflirty\n\nUser: hi")])
        .await
        .expect("completion");
    assert_eq!(content, "hey there");

    let requests = captured.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 64);
    assert_eq!(body["temperature"], 0.5);
    assert_eq!(
        body["messages"],
        json!([{"role": "user", "content": "Personality:\nflirty\n\nUser: hi"}])
    );
}

#[tokio::test]
async fn error_status_is_upstream_error() {
    let (base_url, _) = fake_api(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "Rate limit reached"}}),
    )
    .await;
    let client = OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url(base_url));

    let err = client
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    assert!(err.is_upstream_error());
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn response_without_choices_is_upstream_error() {
    let (base_url, _) = fake_api(StatusCode::OK, json!({"choices": []})).await;
    let client = OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url(base_url));

    let err = client
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    assert!(err.is_upstream_error());
}

#[tokio::test]
async fn unreachable_endpoint_is_upstream_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        OpenAiClient::new(OpenAiConfig::new("sk-test").with_base_url(format!("http://{addr}")));

    let err = client
        .complete(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    assert!(err.is_upstream_error());
}
