use std::collections::BTreeMap;

use color_eyre::{
    eyre::{bail, OptionExt},
    Result,
};

use crate::{
    models::{ChatRequest, ChatResponse, Message, Widget},
    names,
    services::{
        challenge::ChallengeWorkspace,
        quiz::{QuizProgress, QuizStep},
    },
};

// ---------------------------------------------------------------------------
// ChatApi trait (DIP: the conversation defines the endpoint it talks to)
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait ChatApi: Send + Sync {
    fn send(
        &self,
        request: ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse>> + Send;
}

/// Interactive state behind a widget-bearing assistant message.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState {
    Quiz(QuizProgress),
    Challenge(ChallengeWorkspace),
}

impl From<Widget> for WidgetState {
    fn from(widget: Widget) -> Self {
        match widget {
            Widget::Quiz(data) => WidgetState::Quiz(QuizProgress::new(data)),
            Widget::CodingChallenge(data) => WidgetState::Challenge(ChallengeWorkspace::new(data)),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Client-side view of one chat: the draft, the transcript, and the in-flight flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    input: String,
    messages: Vec<Message>,
    /// Keyed by the index of the assistant message that carried the widget.
    widgets: BTreeMap<usize, WidgetState>,
    is_loading: bool,
    /// Bumped on every reset. Replies sent under an older epoch are dropped.
    epoch: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn widget(&self, message_idx: usize) -> Option<&WidgetState> {
        self.widgets.get(&message_idx)
    }

    /// Appends the user message and returns the request to send, or `None` when the text is
    /// blank or another request is still in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() || self.is_loading {
            return None;
        }

        let history = self.messages.iter().map(Message::to_history).collect();
        self.messages.push(Message::user(text));
        self.input.clear();
        self.is_loading = true;

        Some(ChatRequest {
            message: text.to_string(),
            history,
        })
    }

    /// Records the reply to the request sent under `epoch`. Replies that outlived a reset are
    /// discarded so they cannot clear the in-flight flag of a newer request.
    pub fn finish_send(&mut self, epoch: u64, result: Result<ChatResponse>) {
        if epoch != self.epoch {
            tracing::debug!(
                "dropping reply from epoch {epoch}, conversation is at {}",
                self.epoch
            );
            return;
        }

        let message = match result {
            Ok(response) => Message::assistant(response.response, response.widget),
            Err(e) => {
                tracing::error!("error sending message: {e:#}");
                Message::assistant(names::UNREACHABLE_MESSAGE, None)
            }
        };

        if let Some(widget) = &message.widget {
            self.widgets
                .insert(self.messages.len(), WidgetState::from(widget.clone()));
        }
        self.messages.push(message);
        self.is_loading = false;
    }

    /// Runs a full exchange. Returns `false` when nothing was sent.
    pub async fn send<A: ChatApi>(&mut self, api: &A, text: &str) -> bool {
        let Some(request) = self.begin_send(text) else {
            return false;
        };
        let epoch = self.epoch;
        let result = api.send(request).await;
        self.finish_send(epoch, result);
        true
    }

    /// Locks in a quiz answer. When it completes the quiz, the report is queued as the next
    /// user message and its request is returned.
    pub fn answer_quiz(
        &mut self,
        message_idx: usize,
        question_idx: usize,
        answer_idx: usize,
    ) -> Result<Option<ChatRequest>> {
        let is_loading = self.is_loading;
        let Some(WidgetState::Quiz(progress)) = self.widgets.get_mut(&message_idx) else {
            bail!("message {message_idx} has no quiz");
        };
        if is_loading && progress.results().len() + 1 == progress.data().questions.len() {
            bail!("cannot finish the quiz while a message is in flight");
        }

        match progress.answer(question_idx, answer_idx)? {
            QuizStep::Next(_) => Ok(None),
            QuizStep::Finished(report) => Ok(self.begin_send(&report)),
        }
    }

    pub fn challenge_mut(&mut self, message_idx: usize) -> Result<&mut ChallengeWorkspace> {
        match self.widgets.get_mut(&message_idx) {
            Some(WidgetState::Challenge(workspace)) => Ok(workspace),
            _ => bail!("message {message_idx} has no coding challenge"),
        }
    }

    /// Submits a challenge workspace and queues its report as the next user message.
    pub fn submit_challenge(&mut self, message_idx: usize) -> Result<ChatRequest> {
        if self.is_loading {
            bail!("cannot submit while a message is in flight");
        }
        let report = self.challenge_mut(message_idx)?.submit()?;
        self.begin_send(&report)
            .ok_or_eyre("challenge report could not be sent")
    }

    pub fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch + 1,
            ..Self::default()
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
