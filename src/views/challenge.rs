use maud::{html, Markup};
use rust_i18n::t;
use serde_json::json;

use crate::{
    names,
    services::challenge::{ChallengeStatus, ChallengeWorkspace},
    views::chat::{CONVERSATION_TARGET, THINKING_INDICATOR},
};

fn file_icon(name: &str) -> &'static str {
    if name.ends_with("css") {
        "#"
    } else {
        "{ }"
    }
}

pub fn challenge(message_idx: usize, workspace: &ChallengeWorkspace, locale: &str) -> Markup {
    let data = workspace.data();
    let reviewing = workspace.status() == ChallengeStatus::Reviewing;
    let active = workspace.active_file();
    let editor_id = format!("editor-{message_idx}");
    let editor_fields = format!("#{editor_id} [name]");

    html! {
        article.ide-container {
            header {
                h3 { "💻 " (data.title) }
                @if reviewing {
                    span.badge { (t!("challenge.analyzing", locale = locale)) }
                }
            }

            @if let Some(feedback) = &data.feedback {
                div.feedback-alert {
                    div.feedback-header { (t!("challenge.analysis_result", locale = locale)) }
                    div.feedback-content { (feedback) }
                }
            }

            div.description { (data.description) }

            div.editor-workspace {
                div.sidebar {
                    small.sidebar-header { (t!("challenge.files", locale = locale)) }
                    @for (idx, file) in workspace.files().iter().enumerate() {
                        button type="button"
                               class=(tab_class(idx == active))
                               hx-post=(names::challenge_select_url(message_idx))
                               hx-vals=(json!({ "file": idx }).to_string())
                               hx-include=(editor_fields)
                               hx-target=(CONVERSATION_TARGET)
                               hx-swap="outerHTML" {
                            span.icon { (file_icon(&file.name)) }
                            " " (file.name)
                        }
                    }
                }

                @if let Some(file) = workspace.files().get(active) {
                    div.editor-area id=(editor_id) {
                        div.breadcrumbs {
                            (file.name) " "
                            span.lang-badge { (file.language) }
                        }
                        input type="hidden" name="editing" value=(active);
                        textarea.code-input
                                 name="content"
                                 spellcheck="false"
                                 hx-post=(names::challenge_edit_url(message_idx))
                                 hx-trigger="input changed delay:500ms"
                                 hx-include=(editor_fields)
                                 hx-swap="none" {
                            (file.content)
                        }
                    }
                }
            }

            footer {
                button.submit-btn type="button"
                       hx-post=(names::challenge_submit_url(message_idx))
                       hx-include=(editor_fields)
                       hx-target=(CONVERSATION_TARGET)
                       hx-swap="outerHTML"
                       hx-indicator=(THINKING_INDICATOR)
                       disabled[reviewing] {
                    @if reviewing {
                        (t!("challenge.analyzing", locale = locale))
                    } @else {
                        (t!("challenge.submit", locale = locale))
                    }
                }
            }
        }
    }
}

fn tab_class(is_active: bool) -> &'static str {
    if is_active {
        "file-tab active"
    } else {
        "file-tab outline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChallengeData, ChallengeFile};

    fn workspace(feedback: Option<&str>) -> ChallengeWorkspace {
        ChallengeWorkspace::new(ChallengeData {
            title: "Counter".to_string(),
            description: "Build a counter".to_string(),
            feedback: feedback.map(str::to_string),
            files: vec![
                ChallengeFile {
                    name: "index.js".to_string(),
                    language: "javascript".to_string(),
                    content: "let count = 0;".to_string(),
                },
                ChallengeFile {
                    name: "style.css".to_string(),
                    language: "css".to_string(),
                    content: ".counter {}".to_string(),
                },
            ],
        })
    }

    #[test]
    fn renders_tabs_and_active_editor() {
        let html = challenge(2, &workspace(None), "en").into_string();

        assert!(html.contains("index.js"));
        assert!(html.contains("style.css"));
        assert!(html.contains("let count = 0;"));
        assert!(!html.contains(".counter {}"));
        assert!(html.contains("/challenge/2/submit"));
        assert!(!html.contains("Analysis Result"));
    }

    #[test]
    fn review_feedback_and_status_are_shown() {
        let mut workspace = workspace(Some("Looks good"));
        workspace.submit().unwrap();

        let html = challenge(2, &workspace, "en").into_string();

        assert!(html.contains("Analysis Result"));
        assert!(html.contains("Looks good"));
        assert!(html.contains("Analyzing..."));
    }

    #[test]
    fn css_files_get_their_own_icon() {
        assert_eq!(file_icon("style.css"), "#");
        assert_eq!(file_icon("main.rs"), "{ }");
    }
}
