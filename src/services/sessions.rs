use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::services::conversation::Conversation;

struct Entry {
    conversation: Conversation,
    last_active: Instant,
}

/// In-memory conversations keyed by browser session id. Nothing here outlives the process.
#[derive(Clone)]
pub struct ChatSessions {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl ChatSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn new_id() -> String {
        ulid::Ulid::new().to_string()
    }

    /// Runs `f` against the conversation for `id`, starting a fresh one for unknown or
    /// expired ids. The lock is held only for the duration of `f`.
    pub async fn with<R>(&self, id: &str, f: impl FnOnce(&mut Conversation) -> R) -> R {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_active) < self.ttl);
        let expired = before - entries.len();
        if expired > 0 {
            tracing::debug!("expired {expired} idle chat session(s)");
        }

        let entry = entries.entry(id.to_string()).or_insert_with(|| {
            tracing::info!("starting chat session {id}");
            Entry {
                conversation: Conversation::new(),
                last_active: now,
            }
        });
        entry.last_active = now;
        f(&mut entry.conversation)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conversations_are_isolated_per_id() {
        let sessions = ChatSessions::new(Duration::from_secs(60));

        sessions.with("a", |c| c.set_input("draft a")).await;
        sessions.with("b", |c| c.set_input("draft b")).await;

        let a = sessions.with("a", |c| c.input().to_string()).await;
        assert_eq!(a, "draft a");
        assert_eq!(sessions.len().await, 2);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let sessions = ChatSessions::new(Duration::ZERO);

        sessions.with("a", |c| c.set_input("draft")).await;
        let input = sessions.with("a", |c| c.input().to_string()).await;

        assert_eq!(input, "");
        assert_eq!(sessions.len().await, 1);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(ChatSessions::new_id(), ChatSessions::new_id());
    }
}
