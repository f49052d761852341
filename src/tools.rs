use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use serde_json::{json, Value};

use crate::models::{ChallengeData, QuizData, Widget};

static SAMPLE_QUIZ: &str = include_str!("../data/sample_quiz.json");

/// Functions the model may call to produce a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    GenerateQuiz,
    GenerateCodingChallenge,
    /// No-argument variant that hands out the bundled sample quiz.
    GetQuizData,
}

/// A tool declaration as advertised to the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl Tool {
    pub const ALL: [Tool; 3] = [
        Tool::GenerateQuiz,
        Tool::GenerateCodingChallenge,
        Tool::GetQuizData,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::GenerateQuiz => "generate_quiz",
            Tool::GenerateCodingChallenge => "generate_coding_challenge",
            Tool::GetQuizData => "get_quiz_data",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn spec(self) -> ToolSpec {
        let (description, parameters) = match self {
            Tool::GenerateQuiz => (
                "Generate a multiple-choice quiz to test the user's knowledge of a topic. \
                 Use it when the user asks for a quiz or wants to check their understanding.",
                quiz_schema(),
            ),
            Tool::GenerateCodingChallenge => (
                "Generate a hands-on coding challenge with starter files, or re-issue the \
                 current challenge with review feedback after the user submits their code.",
                challenge_schema(),
            ),
            Tool::GetQuizData => (
                "Fetch a ready-made quiz to show the user.",
                json!({ "type": "object", "properties": {} }),
            ),
        };

        ToolSpec {
            name: self.name().to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

fn quiz_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "Title of the quiz" },
            "questions": {
                "type": "array",
                "description": "Generate between 3 and 5 questions",
                "minItems": 3,
                "maxItems": 5,
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "The question text" },
                        "answers": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "title": { "type": "string" },
                                    "feedback": {
                                        "type": "string",
                                        "description": "Explanation shown after this answer is picked"
                                    },
                                    "isCorrect": { "type": "boolean" }
                                },
                                "required": ["title", "feedback", "isCorrect"]
                            }
                        }
                    },
                    "required": ["title", "answers"]
                }
            }
        },
        "required": ["title", "questions"]
    })
}

fn challenge_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": {
                "type": "string",
                "description": "Markdown description of the requirements"
            },
            "feedback": {
                "type": "string",
                "description": "Review of the user's submission. Omit when issuing a new challenge."
            },
            "files": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "File name, e.g. index.js" },
                        "language": { "type": "string", "description": "e.g. javascript, css, rust" },
                        "content": { "type": "string", "description": "Starter code or the user's code" }
                    },
                    "required": ["name", "language", "content"]
                }
            }
        },
        "required": ["title", "description", "files"]
    })
}

/// Decodes the JSON-encoded argument payload of a tool call into a widget.
pub fn decode(tool: Tool, arguments: &str) -> Result<Widget> {
    match tool {
        Tool::GenerateQuiz => {
            let quiz: QuizData = serde_json::from_str(arguments)
                .wrap_err("could not parse generate_quiz arguments")?;
            validate_quiz(&quiz)?;
            Ok(Widget::Quiz(quiz))
        }
        Tool::GenerateCodingChallenge => {
            let challenge: ChallengeData = serde_json::from_str(arguments)
                .wrap_err("could not parse generate_coding_challenge arguments")?;
            if challenge.files.is_empty() {
                bail!("coding challenge '{}' has no files", challenge.title);
            }
            Ok(Widget::CodingChallenge(challenge))
        }
        Tool::GetQuizData => Ok(Widget::Quiz(sample_quiz()?)),
    }
}

pub fn sample_quiz() -> Result<QuizData> {
    serde_json::from_str(SAMPLE_QUIZ).wrap_err("bundled sample quiz is malformed")
}

fn validate_quiz(quiz: &QuizData) -> Result<()> {
    if quiz.questions.is_empty() {
        bail!("quiz '{}' has no questions", quiz.title);
    }

    for (idx, question) in quiz.questions.iter().enumerate() {
        if question.answers.is_empty() {
            return Err(eyre!("question {} '{}' has no answers", idx + 1, question.title));
        }
        if !question.answers.iter().any(|a| a.is_correct) {
            return Err(eyre!(
                "question {} '{}' has no correct answer",
                idx + 1,
                question.title
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_ARGS: &str = r#"{
        "title": "HTTP",
        "questions": [
            {"title": "GET is?", "answers": [
                {"title": "safe", "feedback": "yes", "isCorrect": true},
                {"title": "unsafe", "feedback": "no", "isCorrect": false}
            ]}
        ]
    }"#;

    #[test]
    fn names_round_trip_through_lookup() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("delete_everything"), None);
    }

    #[test]
    fn quiz_schema_bounds_question_count() {
        let spec = Tool::GenerateQuiz.spec();
        assert_eq!(spec.name, "generate_quiz");
        let questions = &spec.parameters["properties"]["questions"];
        assert_eq!(questions["minItems"], 3);
        assert_eq!(questions["maxItems"], 5);
    }

    #[test]
    fn challenge_feedback_is_optional() {
        let spec = Tool::GenerateCodingChallenge.spec();
        let required = spec.parameters["required"].as_array().unwrap();
        assert!(!required.iter().any(|r| r == "feedback"));
        assert!(required.iter().any(|r| r == "files"));
    }

    #[test]
    fn decodes_quiz_arguments() {
        let widget = decode(Tool::GenerateQuiz, QUIZ_ARGS).unwrap();
        let Widget::Quiz(quiz) = widget else {
            panic!("expected quiz widget");
        };
        assert_eq!(quiz.title, "HTTP");
        assert!(quiz.questions[0].answers[0].is_correct);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(decode(Tool::GenerateQuiz, "{\"title\": ").is_err());
        assert!(decode(Tool::GenerateCodingChallenge, "not json").is_err());
    }

    #[test]
    fn rejects_question_without_correct_answer() {
        let args = r#"{"title": "t", "questions": [
            {"title": "q", "answers": [{"title": "a", "feedback": "f", "isCorrect": false}]}
        ]}"#;
        assert!(decode(Tool::GenerateQuiz, args).is_err());
    }

    #[test]
    fn rejects_empty_quiz_and_empty_challenge() {
        assert!(decode(Tool::GenerateQuiz, r#"{"title": "t", "questions": []}"#).is_err());
        assert!(decode(
            Tool::GenerateCodingChallenge,
            r#"{"title": "t", "description": "d", "files": []}"#
        )
        .is_err());
    }

    #[test]
    fn decodes_challenge_with_feedback() {
        let args = r#"{
            "title": "Add",
            "description": "implement add",
            "feedback": "missing return",
            "files": [{"name": "index.js", "language": "javascript", "content": "function add(a,b){}"}]
        }"#;
        let Widget::CodingChallenge(challenge) =
            decode(Tool::GenerateCodingChallenge, args).unwrap()
        else {
            panic!("expected challenge widget");
        };
        assert_eq!(challenge.feedback.as_deref(), Some("missing return"));
        assert_eq!(challenge.files[0].name, "index.js");
    }

    #[test]
    fn quiz_data_tool_ignores_arguments() {
        let widget = decode(Tool::GetQuizData, "{}").unwrap();
        assert_eq!(widget.kind(), "quiz");
        assert!(sample_quiz().unwrap().questions.len() >= 3);
    }
}
