use axum::http::{header::InvalidHeaderValue, HeaderValue};

use crate::names;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let max_age = names::CHAT_SESSION_TTL.as_secs();
    let secure = if secure { " Secure;" } else { "" };
    HeaderValue::from_str(&format!(
        "{name}={value}; HttpOnly; Max-Age={max_age};{secure} Path=/; SameSite=Strict"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_flag_is_optional() {
        let plain = cookie("lang", "ja", false).unwrap();
        assert_eq!(
            plain.to_str().unwrap(),
            "lang=ja; HttpOnly; Max-Age=3600; Path=/; SameSite=Strict"
        );

        let secure = cookie("lang", "ja", true).unwrap();
        assert!(secure.to_str().unwrap().contains("; Secure;"));
    }
}
