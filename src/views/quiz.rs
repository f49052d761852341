use maud::{html, Markup};
use rust_i18n::t;
use serde_json::json;

use crate::{
    models::{QuizQuestion, QuizResult},
    names,
    services::quiz::QuizProgress,
    views::chat::{CONVERSATION_TARGET, THINKING_INDICATOR},
};

pub fn quiz(message_idx: usize, progress: &QuizProgress, locale: &str) -> Markup {
    let data = progress.data();

    html! {
        article.quiz-card {
            h3 { (data.title) }
            @for (q_idx, question) in data.questions.iter().enumerate() {
                @if let (Some(result), Some(choice)) =
                    (progress.results().get(q_idx), progress.choice(q_idx))
                {
                    (answered_question(q_idx, question, result, choice, locale))
                } @else if progress.active_question() == Some(q_idx) {
                    (active_question(message_idx, q_idx, question, locale))
                }
            }
            @if progress.is_finished() {
                footer.quiz-complete {
                    h4 { (t!("quiz.complete", locale = locale)) }
                    p {
                        (t!(
                            "quiz.score",
                            locale = locale,
                            score = progress.score(),
                            total = data.questions.len()
                        ))
                    }
                }
            }
        }
    }
}

fn question_heading(q_idx: usize, question: &QuizQuestion, locale: &str) -> Markup {
    html! {
        h4 {
            (t!("quiz.question_prefix", locale = locale, number = q_idx + 1))
            (question.title)
        }
    }
}

fn active_question(
    message_idx: usize,
    q_idx: usize,
    question: &QuizQuestion,
    locale: &str,
) -> Markup {
    html! {
        div.question {
            (question_heading(q_idx, question, locale))
            div.answers {
                @for (a_idx, answer) in question.answers.iter().enumerate() {
                    button type="button"
                           hx-post=(names::quiz_answer_url(message_idx))
                           hx-vals=(json!({ "question": q_idx, "answer": a_idx }).to_string())
                           hx-target=(CONVERSATION_TARGET)
                           hx-swap="outerHTML"
                           hx-indicator=(THINKING_INDICATOR) {
                        (answer.title)
                    }
                }
            }
        }
    }
}

fn answered_question(
    q_idx: usize,
    question: &QuizQuestion,
    result: &QuizResult,
    choice: usize,
    locale: &str,
) -> Markup {
    let feedback_class = if result.is_correct {
        "feedback success"
    } else {
        "feedback error"
    };

    html! {
        div.question.answered {
            (question_heading(q_idx, question, locale))
            div.answers {
                @for (a_idx, answer) in question.answers.iter().enumerate() {
                    button type="button"
                           class=(answer_class(a_idx == choice, answer.is_correct))
                           disabled {
                        (answer.title)
                    }
                }
            }
            div class=(feedback_class) {
                small { (t!("quiz.your_answer", locale = locale)) (result.user_answer) }
                p { (result.feedback) }
            }
        }
    }
}

fn answer_class(chosen: bool, is_correct: bool) -> &'static str {
    match (chosen, is_correct) {
        (true, true) => "chosen correct",
        (true, false) => "chosen",
        _ => "secondary outline",
    }
}
