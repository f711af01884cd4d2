use super::*;
use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>,
}

async fn spawn_completion_server(reply: serde_json::Value, status: StatusCode) -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(state): State<Captured>,
                      headers: HeaderMap,
                      Json(body): Json<serde_json::Value>| {
                    let reply = reply.clone();
                    async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        state.requests.lock().await.push((auth, body));
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}/v1"), captured)
}

fn settings(base_url: String) -> LlmSettings {
    LlmSettings {
        base_url,
        api_key: Some("sk-test".into()),
        model: "gpt-4".into(),
    }
}

#[tokio::test]
async fn completion_sends_system_prompt_and_returns_first_choice() {
    let (base_url, captured) = spawn_completion_server(
        serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "I build apps." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }),
        StatusCode::OK,
    )
    .await;

    let client = LlmClient::new(settings(base_url));
    let answer = client.complete("what do you do").await.expect("answer");
    assert_eq!(answer, "I build apps.");

    let requests = captured.requests.lock().await;
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["content"], "what do you do");
}

#[tokio::test]
async fn api_errors_surface_status_and_body() {
    let (base_url, _captured) = spawn_completion_server(
        serde_json::json!({ "error": "quota" }),
        StatusCode::TOO_MANY_REQUESTS,
    )
    .await;

    let err = LlmClient::new(settings(base_url))
        .complete("hi")
        .await
        .expect_err("should fail");
    assert!(matches!(err, LlmError::Api { status: 429, .. }));
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let (base_url, _captured) =
        spawn_completion_server(serde_json::json!({ "choices": [] }), StatusCode::OK).await;
    let err = LlmClient::new(settings(base_url))
        .complete("hi")
        .await
        .expect_err("should fail");
    assert!(matches!(err, LlmError::EmptyChoices));
}

#[tokio::test]
async fn responder_apologizes_when_not_configured() {
    let client = LlmClient::new(LlmSettings::default());
    assert!(!client.is_configured());

    let responder = LlmResponder::new(client);
    assert_eq!(responder.method(), ResponseMethod::Llm);
    assert_eq!(
        responder.respond("anything").await.as_deref(),
        Some("Sorry, I couldn't process your request. Error: language model is not configured")
    );
}
