pub mod challenge;
pub mod chat;
pub mod conversation;
pub mod quiz;
pub mod remote;
pub mod sessions;

use color_eyre::Result;

use crate::models::{ChatRequest, ChatResponse};
use chat::ChatService;
use conversation::ChatApi;
use remote::RemoteChat;

/// Where chat requests are answered: in this process, or by another endpoint.
#[derive(Clone)]
pub enum ChatBackend {
    Local(ChatService),
    Remote(RemoteChat),
}

impl ChatApi for ChatBackend {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse> {
        match self {
            ChatBackend::Local(service) => service.respond(request).await,
            ChatBackend::Remote(remote) => remote.send(request).await,
        }
    }
}
