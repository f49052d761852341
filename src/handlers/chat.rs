use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    extractors::{self, BrowserSession, IsHtmx, Locale},
    models::ChatRequest,
    names,
    rejections::{AppError, ResultExt},
    services::conversation::ChatApi,
    utils, views,
    views::chat as chat_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::HOME_URL, get(home))
        .route(names::SEND_URL, post(send))
        .route(names::RESET_URL, post(reset))
        .route(names::SET_LOCALE_URL, post(set_locale))
}

/// Sends a request queued on the session's conversation under `epoch` and records the
/// outcome. The session lock is not held while the endpoint is working.
pub(crate) async fn exchange(
    state: &AppState,
    session_id: &str,
    epoch: u64,
    request: ChatRequest,
) {
    let result = state.chat.send(request).await;
    state
        .sessions
        .with(session_id, |conversation| conversation.finish_send(epoch, result))
        .await;
}

/// Renders the session's conversation fragment, issuing the session cookie on first contact.
pub(crate) async fn conversation_response(
    state: &AppState,
    session: &BrowserSession,
    locale: &str,
) -> Result<Response, AppError> {
    let markup = state
        .sessions
        .with(&session.id, |conversation| {
            chat_views::conversation(conversation, locale)
        })
        .await;
    with_session_cookie(state, session, markup)
}

fn with_session_cookie(
    state: &AppState,
    session: &BrowserSession,
    markup: Markup,
) -> Result<Response, AppError> {
    let mut headers = HeaderMap::new();
    if session.is_new {
        let cookie = utils::cookie(
            names::CHAT_SESSION_COOKIE_NAME,
            &session.id,
            state.secure_cookies,
        )
        .reject("could not build session cookie")?;
        headers.insert(SET_COOKIE, cookie);
    }
    Ok((headers, markup).into_response())
}

async fn home(
    State(state): State<AppState>,
    session: BrowserSession,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    let body = state
        .sessions
        .with(&session.id, |conversation| {
            chat_views::conversation(conversation, &locale)
        })
        .await;
    let page = views::render(is_htmx, "Chat", body, &locale);
    with_session_cookie(&state, &session, page)
}

#[derive(Deserialize)]
struct SendBody {
    #[serde(default)]
    message: String,
}

async fn send(
    State(state): State<AppState>,
    session: BrowserSession,
    Locale(locale): Locale,
    Json(body): Json<SendBody>,
) -> Result<Response, AppError> {
    let (epoch, request) = state
        .sessions
        .with(&session.id, |conversation| {
            conversation.set_input(body.message.as_str());
            (conversation.epoch(), conversation.begin_send(&body.message))
        })
        .await;

    match request {
        Some(request) => exchange(&state, &session.id, epoch, request).await,
        None => tracing::debug!("ignoring blank or concurrent message for {}", session.id),
    }

    conversation_response(&state, &session, &locale).await
}

async fn reset(
    State(state): State<AppState>,
    session: BrowserSession,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    state
        .sessions
        .with(&session.id, |conversation| conversation.reset())
        .await;
    tracing::info!("reset conversation for {}", session.id);

    conversation_response(&state, &session, &locale).await
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Json(body): Json<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = extractors::match_supported_locale(&body.locale).unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(names::LOCALE_COOKIE_NAME, locale, state.secure_cookies)
        .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
