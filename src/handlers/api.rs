use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::{
    models::{ChatRequest, ChatResponse},
    names,
    rejections::{AppError, ResultExt},
    services::conversation::ChatApi,
    utils, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::API_ROOT_URL, get(api_root))
        .route(names::CHAT_API_URL, post(chat))
}

async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to learnchat API",
        "version": utils::VERSION,
    }))
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = state
        .chat
        .send(body)
        .await
        .reject_api(names::CHAT_FAILURE)?;

    Ok(Json(response))
}
