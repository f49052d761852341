use axum::{
    extract::{Path, State},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use super::{
    chat::{conversation_response, exchange},
    deserialize_string_or_usize,
};
use crate::{
    extractors::{BrowserSession, Locale},
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/quiz/{message_idx}/answer", post(answer))
}

#[derive(Deserialize)]
struct AnswerBody {
    #[serde(deserialize_with = "deserialize_string_or_usize")]
    question: usize,
    #[serde(deserialize_with = "deserialize_string_or_usize")]
    answer: usize,
}

async fn answer(
    State(state): State<AppState>,
    session: BrowserSession,
    Path(message_idx): Path<usize>,
    Locale(locale): Locale,
    Json(body): Json<AnswerBody>,
) -> Result<Response, AppError> {
    let (epoch, report) = state
        .sessions
        .with(&session.id, |conversation| {
            conversation
                .answer_quiz(message_idx, body.question, body.answer)
                .map(|report| (conversation.epoch(), report))
        })
        .await
        .reject_input("could not record quiz answer")?;

    if let Some(request) = report {
        tracing::info!("quiz in message {message_idx} finished, sending results");
        exchange(&state, &session.id, epoch, request).await;
    }

    conversation_response(&state, &session, &locale).await
}
