use super::*;
use axum::{body, body::Body, http::Request};
use tower::ServiceExt;

fn test_app() -> Router {
    let knowledge_base = KnowledgeBase::from_pairs([
        ("hello", "Hi! I'm the portfolio assistant."),
        ("what are your skills", "Rust, Python and Flutter."),
    ]);
    let pipeline = ChatPipeline::offline(Arc::new(knowledge_base), 0.3)
        .with_fallback(LlmResponder::new(LlmClient::new(Default::default())));
    build_router(Arc::new(AppState {
        pipeline: Arc::new(pipeline),
    }))
}

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::post("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn home_describes_the_chat_endpoint() {
    let response = test_app()
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "message": "Chatbot API is running. Use the /chat endpoint to interact."
        })
    );
}

#[tokio::test]
async fn healthz_reports_ok() {
    let response = test_app()
        .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn chat_answers_with_response_and_method() {
    let response = test_app()
        .oneshot(chat_request(serde_json::json!({ "message": "  Hello " })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "response": "Hi! I'm the portfolio assistant.",
            "method": "Rule-Based"
        })
    );
}

#[tokio::test]
async fn unknown_questions_fall_back_to_the_llm_stage() {
    let response = test_app()
        .oneshot(chat_request(serde_json::json!({ "message": "zzzz" })))
        .await
        .expect("response");
    let body = json_body(response).await;
    assert_eq!(body["method"], "LLM");
    assert_eq!(
        body["response"],
        "Sorry, I couldn't process your request. Error: language model is not configured"
    );
}

#[tokio::test]
async fn missing_message_field_is_a_validation_error() {
    let response = test_app()
        .oneshot(chat_request(serde_json::json!({ "text": "hi" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "validation");
}

#[tokio::test]
async fn plain_text_body_is_rejected_as_unsupported_media() {
    let request = Request::post("/chat")
        .header("content-type", "text/plain")
        .body(Body::from("hi"))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(response).await["code"], "unsupported_media_type");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::post("/chat")
        .header("origin", "http://localhost:8000")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"message":"hello"}"#))
        .expect("request");
    let response = test_app().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
