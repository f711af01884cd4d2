use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chatbot::{ChatPipeline, KnowledgeBase, LlmClient, LlmResponder};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ChatRequest, ChatResponse, HomeResponse},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_REQUEST_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let knowledge_base = KnowledgeBase::load(&settings.knowledge_base_path).with_context(|| {
        format!(
            "failed to load knowledge base from '{}'",
            settings.knowledge_base_path.display()
        )
    })?;
    info!(
        entries = knowledge_base.len(),
        path = %settings.knowledge_base_path.display(),
        "knowledge base loaded"
    );

    let llm = LlmClient::new(settings.llm_settings());
    if !llm.is_configured() {
        warn!("OPENAI_API_KEY is not set; language model fallback will report an error");
    }
    let pipeline = ChatPipeline::offline(Arc::new(knowledge_base), settings.retrieval_min_score)
        .with_fallback(LlmResponder::new(llm));

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "chatbot server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/chat", post(chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .layer(cors)
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse::default())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(reject_json)?;
    let response = state
        .pipeline
        .answer(&req.message)
        .await
        .map(ChatResponse::from)
        .unwrap_or_default();
    Ok(Json(response))
}

fn reject_json(rejection: JsonRejection) -> (StatusCode, Json<ApiError>) {
    let code = match rejection {
        JsonRejection::MissingJsonContentType(_) => ErrorCode::UnsupportedMediaType,
        _ => ErrorCode::Validation,
    };
    (
        rejection.status(),
        Json(ApiError::new(code, rejection.body_text())),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
