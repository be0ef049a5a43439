use crate::domain::ports::SessionStore;
use crate::domain::session::{ConversationId, Session};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for active conversation sessions.
///
/// Uses `Arc<RwLock<HashMap<i64, Session>>>` to allow shared concurrent
/// access. Sessions are transient by design: nothing survives a process
/// restart.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat: ConversationId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&chat.0).cloned())
    }

    async fn put(&self, chat: ConversationId, session: Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(chat.0, session);
        Ok(())
    }

    async fn remove(&self, chat: ConversationId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&chat.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::{SessionState, UserId};

    #[tokio::test]
    async fn test_put_get_remove_roundtrip() {
        let store = InMemorySessionStore::new();
        let chat = ConversationId(7);
        let mut session = Session::new(UserId(1));
        session.state = SessionState::AwaitingTxUrl;

        store.put(chat, session.clone()).await.unwrap();
        let retrieved = store.get(chat).await.unwrap().unwrap();
        assert_eq!(retrieved, session);

        store.remove(chat).await.unwrap();
        assert!(store.get(chat).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conversations_are_independent() {
        let store = InMemorySessionStore::new();
        store
            .put(ConversationId(1), Session::new(UserId(1)))
            .await
            .unwrap();

        assert!(store.get(ConversationId(2)).await.unwrap().is_none());
        store.remove(ConversationId(2)).await.unwrap();
        assert!(store.get(ConversationId(1)).await.unwrap().is_some());
    }
}
