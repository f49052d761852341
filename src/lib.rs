rust_i18n::i18n!("locales", fallback = "en");

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod openai;
pub mod prompt;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod tools;
pub mod utils;
pub mod views;

use axum::{middleware, Router};

use services::{sessions::ChatSessions, ChatBackend};

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatBackend,
    pub sessions: ChatSessions,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(chat: ChatBackend, secure_cookies: bool) -> Self {
        Self {
            chat,
            sessions: ChatSessions::new(names::CHAT_SESSION_TTL),
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::chat::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::challenge::routes())
        .layer(middleware::from_fn(csrf_check))
        .merge(handlers::api::routes())
        .nest("/static", statics::routes())
        .with_state(state)
}

/// State-changing UI requests must come from htmx. The JSON API is exempt.
async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
