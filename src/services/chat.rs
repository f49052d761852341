use color_eyre::{eyre::eyre, Result};

use crate::{
    models::{ChatRequest, ChatResponse, HistoryEntry, Widget},
    openai::OpenAiClient,
    prompt::{self, Variant},
    services::conversation::ChatApi,
    tools::{self, ToolSpec},
};

pub const QUIZ_CONFIRMATION: &str = "Here's a quiz to test your knowledge!";
pub const NEW_CHALLENGE_CONFIRMATION: &str = "Here's a new coding challenge for you!";
pub const REVIEWED_CHALLENGE_CONFIRMATION: &str =
    "I've reviewed your code. Check the feedback below.";

// ---------------------------------------------------------------------------
// CompletionProvider trait (DIP: service defines the abstraction it needs)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<HistoryEntry>,
    /// Empty means the request carries no tool declarations at all.
    pub tools: Vec<ToolSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded argument object, exactly as the provider sent it.
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

#[cfg_attr(test, mockall::automock)]
pub trait CompletionProvider: Send + Sync {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl std::future::Future<Output = Result<Completion>> + Send;
}

// ---------------------------------------------------------------------------
// ChatService
// ---------------------------------------------------------------------------

pub struct ChatService<P: CompletionProvider = OpenAiClient> {
    provider: P,
    variant: Variant,
}

impl<P: CompletionProvider + Clone> Clone for ChatService<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            variant: self.variant,
        }
    }
}

impl<P: CompletionProvider> ChatService<P> {
    pub fn new(provider: P, variant: Variant) -> Self {
        Self { provider, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub async fn respond(&self, request: ChatRequest) -> Result<ChatResponse> {
        let messages = prompt::build_messages(self.variant, &request.history, &request.message);
        let tools = self.variant.tools().iter().map(|t| t.spec()).collect();

        let completion = self
            .provider
            .complete(CompletionRequest { messages, tools })
            .await?;

        let response = self.unwrap_completion(completion)?;

        tracing::info!(
            variant = ?self.variant,
            history = request.history.len(),
            widget = response.widget.as_ref().map(Widget::kind).unwrap_or("none"),
            "chat exchange completed"
        );

        Ok(response)
    }

    /// The first call naming a tool registered for this variant wins; calls after it are
    /// ignored. Unregistered names are skipped, and a completion made only of those fails.
    fn unwrap_completion(&self, completion: Completion) -> Result<ChatResponse> {
        if completion.tool_calls.is_empty() {
            return Ok(ChatResponse {
                response: completion.content.unwrap_or_default(),
                widget: None,
            });
        }

        let mut calls = completion.tool_calls.into_iter();
        let (tool, call) = calls
            .by_ref()
            .find_map(|call| match self.variant.registered_tool(&call.name) {
                Some(tool) => Some((tool, call)),
                None => {
                    tracing::warn!("skipping call to unregistered tool '{}'", call.name);
                    None
                }
            })
            .ok_or_else(|| eyre!("model called no tool registered for {:?}", self.variant))?;

        let ignored = calls.count();
        if ignored > 0 {
            tracing::debug!("ignoring {ignored} tool call(s) after '{}'", call.name);
        }

        let widget = tools::decode(tool, &call.arguments)?;
        let response = match &widget {
            Widget::Quiz(_) => QUIZ_CONFIRMATION,
            Widget::CodingChallenge(c) if c.feedback.is_some() => REVIEWED_CHALLENGE_CONFIRMATION,
            Widget::CodingChallenge(_) => NEW_CHALLENGE_CONFIRMATION,
        };

        Ok(ChatResponse {
            response: response.to_string(),
            widget: Some(widget),
        })
    }
}

impl<P: CompletionProvider> ChatApi for ChatService<P> {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.respond(request).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
