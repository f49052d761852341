use crate::{
    models::{HistoryEntry, Role},
    tools::Tool,
};

const ASSISTANT_PROMPT: &str = "You are a helpful AI assistant.";

const QUIZ_DEMO_PROMPT: &str = "You are a friendly programming tutor. \
When the user wants a quiz, call the get_quiz_data function instead of writing questions yourself.";

const QUIZ_TUTOR_PROMPT: &str = "You are a friendly programming tutor. \
Explain concepts clearly and concisely. \
When the user asks for a quiz or wants to test their knowledge, call the generate_quiz function \
with 3 to 5 questions, each with one correct answer and helpful feedback for every answer. \
When the user reports quiz results, review the questions they got wrong.";

const TUTOR_PROMPT: &str = "You are a friendly programming tutor. \
Explain concepts clearly and concisely. \
When the user asks for a quiz or wants to test their knowledge, call the generate_quiz function \
with 3 to 5 questions, each with one correct answer and helpful feedback for every answer. \
When the user wants to practice coding, call the generate_coding_challenge function with a clear \
description and starter files, and leave feedback empty. \
When the user submits code for a challenge, review it against the original requirements and call \
generate_coding_challenge again with the same title and description, the user's files, and your \
review in feedback.";

/// Which system instruction and tool set the endpoint runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Plain assistant, no tools.
    Assistant,
    /// Tutor that serves the bundled sample quiz.
    QuizDemo,
    /// Tutor that generates quizzes.
    QuizTutor,
    /// Tutor that generates quizzes and coding challenges.
    #[default]
    Tutor,
}

impl Variant {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Variant::Assistant => ASSISTANT_PROMPT,
            Variant::QuizDemo => QUIZ_DEMO_PROMPT,
            Variant::QuizTutor => QUIZ_TUTOR_PROMPT,
            Variant::Tutor => TUTOR_PROMPT,
        }
    }

    pub fn tools(self) -> &'static [Tool] {
        match self {
            Variant::Assistant => &[],
            Variant::QuizDemo => &[Tool::GetQuizData],
            Variant::QuizTutor => &[Tool::GenerateQuiz],
            Variant::Tutor => &[Tool::GenerateQuiz, Tool::GenerateCodingChallenge],
        }
    }

    /// Looks up a tool by name among the ones this variant registers.
    pub fn registered_tool(self, name: &str) -> Option<Tool> {
        Tool::from_name(name).filter(|tool| self.tools().contains(tool))
    }
}

/// System instruction, then the history verbatim, then the new user message.
pub fn build_messages(
    variant: Variant,
    history: &[HistoryEntry],
    message: &str,
) -> Vec<HistoryEntry> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(HistoryEntry {
        role: Role::System,
        content: variant.system_prompt().to_string(),
    });
    messages.extend_from_slice(history);
    messages.push(HistoryEntry {
        role: Role::User,
        content: message.to_string(),
    });
    messages
}
