use super::event::FileRef;
use super::session::{ConversationId, Session};
use crate::error::Result;
use async_trait::async_trait;

/// Outbound capability of the chat platform.
///
/// Replies always target the originating conversation; `forward_*` calls
/// always target the fixed recipient configured at construction time.
#[async_trait]
pub trait DeliveryGateway: Send + Sync {
    async fn send_text(&self, chat: ConversationId, text: String, markdown: bool) -> Result<()>;

    /// Downloads the referenced file into memory.
    async fn retrieve_file(&self, file: &FileRef) -> Result<Vec<u8>>;

    async fn forward_summary(&self, text: String) -> Result<()>;

    async fn forward_document(&self, bytes: Vec<u8>, caption: String) -> Result<()>;
}

/// Per-conversation scratch space for active sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, chat: ConversationId) -> Result<Option<Session>>;
    async fn put(&self, chat: ConversationId, session: Session) -> Result<()>;
    async fn remove(&self, chat: ConversationId) -> Result<()>;
}

pub type DeliveryGatewayBox = Box<dyn DeliveryGateway>;
pub type SessionStoreBox = Box<dyn SessionStore>;
