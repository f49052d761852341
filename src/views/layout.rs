use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{names, utils};

const HTMX_URL: &str = "https://unpkg.com/htmx.org@1.9.12";
const JSON_ENC_URL: &str = "https://unpkg.com/htmx.org@1.9.12/dist/ext/json-enc.js";

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        script src=(HTMX_URL) {}
        script src=(JSON_ENC_URL) {}
    }
}

fn locale_switcher(locale: &str) -> Markup {
    html! {
        @for supported in names::SUPPORTED_LOCALES {
            li {
                @if *supported == locale {
                    strong { (supported) }
                } @else {
                    a href="#"
                      hx-post=(names::SET_LOCALE_URL)
                      hx-vals=(format!(r#"{{"locale": "{supported}"}}"#)) {
                        (supported)
                    }
                }
            }
        }
    }
}

fn header(locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href=(names::HOME_URL) {
                            strong { (t!("app.title", locale = locale)) }
                        }
                    }
                }
                ul {
                    li {
                        button."outline secondary"
                               hx-post=(names::RESET_URL)
                               hx-target="#conversation"
                               hx-swap="outerHTML" {
                            (t!("app.new_conversation", locale = locale))
                        }
                    }
                    (locale_switcher(locale))
                    li."secondary" { (utils::VERSION) }
                }
            }
        }
    }
}

pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";

                (css())
                (js())

                title { (format!("{title} - {}", t!("app.title", locale = locale))) }
            }

            body."container" hx-ext="json-enc" {
                (header(locale))
                main { (body) }
            }
        }
    }
}

/// Full page for direct navigation, bare fragment for htmx swaps.
pub fn render(is_htmx: bool, title: &str, body: Markup, locale: &str) -> Markup {
    if is_htmx {
        body
    } else {
        page(title, body, locale)
    }
}
