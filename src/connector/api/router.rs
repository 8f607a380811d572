use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::container::Container;
use super::controller::{ChatController, PersonaController};
use super::dto::{AgentResponse, ChatRequest, ChatResponse, CreateAgentRequest, CreateAgentResponse};
use super::error::ApiResult;

/// Builds the HTTP routes over an already constructed [`Container`].
pub fn build_router(container: Arc<Container>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    axum::Router::new()
        .route("/create-agent", post(create_agent))
        .route("/chat", post(chat))
        .route("/agent/{agent_id}", get(get_agent))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(container)
}

async fn create_agent(
    State(container): State<Arc<Container>>,
    payload: Result<Json<CreateAgentRequest>, JsonRejection>,
) -> ApiResult<Json<CreateAgentResponse>> {
    let Json(request) = payload?;
    let response = PersonaController::new(&container).create(request).await?;
    Ok(Json(response))
}

async fn chat(
    State(container): State<Arc<Container>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload?;
    let response = ChatController::new(&container).chat(request).await?;
    Ok(Json(response))
}

async fn get_agent(
    State(container): State<Arc<Container>>,
    Path(agent_id): Path<String>,
) -> ApiResult<Json<AgentResponse>> {
    let response = PersonaController::new(&container).fetch(&agent_id).await?;
    Ok(Json(response))
}
