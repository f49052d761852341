use std::time::Duration;

pub const HOME_URL: &str = "/";
pub const API_ROOT_URL: &str = "/api";
pub const CHAT_API_URL: &str = "/api/chat";
pub const SEND_URL: &str = "/send";
pub const RESET_URL: &str = "/reset";
pub const SET_LOCALE_URL: &str = "/set-locale";

pub fn quiz_answer_url(message_idx: usize) -> String {
    format!("/quiz/{message_idx}/answer")
}

pub fn challenge_select_url(message_idx: usize) -> String {
    format!("/challenge/{message_idx}/select")
}

pub fn challenge_edit_url(message_idx: usize) -> String {
    format!("/challenge/{message_idx}/edit")
}

pub fn challenge_submit_url(message_idx: usize) -> String {
    format!("/challenge/{message_idx}/submit")
}

pub const CHAT_SESSION_COOKIE_NAME: &str = "chat_session";
/// Idle time after which a browser conversation is forgotten.
pub const CHAT_SESSION_TTL: Duration = Duration::from_secs(3600);

// Provider defaults
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PROVIDER_URL: &str = "https://api.openai.com/v1";

pub const CHAT_FAILURE: &str = "Failed to fetch AI response";
pub const UNREACHABLE_MESSAGE: &str = "Sorry, I couldn't reach the server.";

// i18n
pub const LOCALE_COOKIE_NAME: &str = "lang";
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "ja"];
