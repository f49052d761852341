use std::fmt::Write;

use color_eyre::{eyre::bail, Result};

use crate::models::{QuizData, QuizResult};

/// Outcome of locking in one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    Next(QuizResult),
    /// The last question was answered. Carries the report to send back to the tutor.
    Finished(String),
}

/// Answer-by-answer progress through one quiz widget.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizProgress {
    data: QuizData,
    results: Vec<QuizResult>,
    /// Index of the picked answer, one per entry in `results`.
    choices: Vec<usize>,
}

impl QuizProgress {
    pub fn new(data: QuizData) -> Self {
        Self {
            data,
            results: Vec::new(),
            choices: Vec::new(),
        }
    }

    pub fn data(&self) -> &QuizData {
        &self.data
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    /// Answer picked for `question_idx`, if it has been answered.
    pub fn choice(&self, question_idx: usize) -> Option<usize> {
        self.choices.get(question_idx).copied()
    }

    /// Index of the first unanswered question.
    pub fn active_question(&self) -> Option<usize> {
        (self.results.len() < self.data.questions.len()).then_some(self.results.len())
    }

    pub fn is_finished(&self) -> bool {
        !self.data.questions.is_empty() && self.active_question().is_none()
    }

    pub fn answer(&mut self, question_idx: usize, answer_idx: usize) -> Result<QuizStep> {
        let Some(active) = self.active_question() else {
            bail!("quiz '{}' has no question left to answer", self.data.title);
        };
        if question_idx != active {
            bail!("question {question_idx} is not the active question ({active})");
        }

        let question = &self.data.questions[active];
        let Some(answer) = question.answers.get(answer_idx) else {
            bail!("question {question_idx} has no answer {answer_idx}");
        };

        let result = QuizResult {
            question: question.title.clone(),
            user_answer: answer.title.clone(),
            is_correct: answer.is_correct,
            feedback: answer.feedback.clone(),
        };
        self.results.push(result.clone());
        self.choices.push(answer_idx);

        if self.is_finished() {
            Ok(QuizStep::Finished(self.report()))
        } else {
            Ok(QuizStep::Next(result))
        }
    }

    pub fn score(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }

    /// Natural-language summary of the recorded results.
    pub fn report(&self) -> String {
        let mut report = format!(
            "I scored {} out of {} on the quiz \"{}\". Here are my answers:\n",
            self.score(),
            self.data.questions.len(),
            self.data.title
        );

        for (idx, result) in self.results.iter().enumerate() {
            let verdict = if result.is_correct { "correct" } else { "incorrect" };
            let _ = write!(
                report,
                "\n{}. {}\n   My answer: {} ({verdict})\n   Feedback: {}\n",
                idx + 1,
                result.question,
                result.user_answer,
                result.feedback
            );
        }

        report.push_str("\nCan you help me understand what I got wrong?");
        report
    }
}
