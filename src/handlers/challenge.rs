use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::post,
    Json, Router,
};
use color_eyre::Result;
use serde::Deserialize;

use super::{
    chat::{conversation_response, exchange},
    deserialize_string_or_usize,
};
use crate::{
    extractors::{BrowserSession, Locale},
    models::ChatRequest,
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/challenge/{message_idx}/select", post(select_file))
        .route("/challenge/{message_idx}/edit", post(edit_file))
        .route("/challenge/{message_idx}/submit", post(submit))
}

/// Contents of the open editor, flushed with every challenge request.
#[derive(Deserialize)]
struct EditorBody {
    #[serde(deserialize_with = "deserialize_string_or_usize")]
    editing: usize,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct SelectBody {
    #[serde(deserialize_with = "deserialize_string_or_usize")]
    file: usize,
    #[serde(deserialize_with = "deserialize_string_or_usize")]
    editing: usize,
    #[serde(default)]
    content: String,
}

async fn select_file(
    State(state): State<AppState>,
    session: BrowserSession,
    Path(message_idx): Path<usize>,
    Locale(locale): Locale,
    Json(body): Json<SelectBody>,
) -> Result<Response, AppError> {
    state
        .sessions
        .with(&session.id, |conversation| -> Result<()> {
            let workspace = conversation.challenge_mut(message_idx)?;
            workspace.edit_file(body.editing, body.content)?;
            workspace.select_file(body.file)
        })
        .await
        .reject_input("could not switch file")?;

    conversation_response(&state, &session, &locale).await
}

async fn edit_file(
    State(state): State<AppState>,
    session: BrowserSession,
    Path(message_idx): Path<usize>,
    Json(body): Json<EditorBody>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with(&session.id, |conversation| -> Result<()> {
            conversation
                .challenge_mut(message_idx)?
                .edit_file(body.editing, body.content)
        })
        .await
        .reject_input("could not save file")?;

    Ok(StatusCode::NO_CONTENT)
}

async fn submit(
    State(state): State<AppState>,
    session: BrowserSession,
    Path(message_idx): Path<usize>,
    Locale(locale): Locale,
    Json(body): Json<EditorBody>,
) -> Result<Response, AppError> {
    let (epoch, request) = state
        .sessions
        .with(&session.id, |conversation| -> Result<(u64, ChatRequest)> {
            conversation
                .challenge_mut(message_idx)?
                .edit_file(body.editing, body.content)?;
            let request = conversation.submit_challenge(message_idx)?;
            Ok((conversation.epoch(), request))
        })
        .await
        .reject_input("could not submit challenge")?;

    tracing::info!("challenge in message {message_idx} submitted for review");
    exchange(&state, &session.id, epoch, request).await;

    conversation_response(&state, &session, &locale).await
}
