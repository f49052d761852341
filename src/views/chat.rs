use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    models::{Message, Role},
    names,
    services::conversation::{Conversation, WidgetState},
    views::{challenge as challenge_views, quiz as quiz_views},
};

/// Id of the element every conversation-changing request swaps.
pub const CONVERSATION_TARGET: &str = "#conversation";
pub const THINKING_INDICATOR: &str = "#thinking";

pub fn conversation(conversation: &Conversation, locale: &str) -> Markup {
    let is_loading = conversation.is_loading();

    html! {
        section id="conversation" {
            div.messages {
                @if conversation.messages().is_empty() {
                    p.empty-state { (t!("chat.empty_state", locale = locale)) }
                }
                @for (idx, msg) in conversation.messages().iter().enumerate() {
                    (message(idx, msg, conversation.widget(idx), locale))
                }
                div id="thinking" class=(if is_loading { "loading active" } else { "loading" }) {
                    (t!("chat.thinking", locale = locale))
                }
            }

            form.input-area
                 hx-post=(names::SEND_URL)
                 hx-target=(CONVERSATION_TARGET)
                 hx-swap="outerHTML"
                 hx-indicator=(THINKING_INDICATOR)
                 hx-disabled-elt="find input, find button" {
                input type="text"
                      name="message"
                      value=(conversation.input())
                      placeholder=(t!("chat.placeholder", locale = locale))
                      autocomplete="off"
                      autofocus
                      disabled[is_loading];
                button type="submit" disabled[is_loading] {
                    (t!("chat.send", locale = locale))
                }
            }
        }
    }
}

fn message(idx: usize, msg: &Message, widget: Option<&WidgetState>, locale: &str) -> Markup {
    let (class, label) = match msg.role {
        Role::User => ("message user", t!("chat.you", locale = locale)),
        Role::Assistant | Role::System => ("message assistant", t!("chat.ai", locale = locale)),
    };

    html! {
        div class=(class) {
            strong { (label) ":" }
            p { (msg.content) }
            @match widget {
                Some(WidgetState::Quiz(progress)) => {
                    (quiz_views::quiz(idx, progress, locale))
                }
                Some(WidgetState::Challenge(workspace)) => {
                    (challenge_views::challenge(idx, workspace, locale))
                }
                None => {}
            }
        }
    }
}
