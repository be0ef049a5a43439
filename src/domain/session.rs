/// Opaque identifier of the remote user, assigned by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

/// Identifies one conversation (a chat) on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(pub i64);

/// Identity attached to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub user_id: UserId,
    pub username: Option<String>,
}

impl Sender {
    /// Display name recorded when the transaction URL is accepted. Users
    /// without a public username get a fixed placeholder.
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| "No username".to_string())
    }
}

/// Data captured at URL acceptance. Only the `AwaitingImage` state carries
/// it, so it cannot exist half-filled or out of step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub username: String,
    pub tx_url: String,
}

/// Where a conversation currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingStart,
    AwaitingTxUrl,
    AwaitingImage(Submission),
    Terminated,
}

impl SessionState {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingStart => "awaiting_start",
            Self::AwaitingTxUrl => "awaiting_tx_url",
            Self::AwaitingImage(_) => "awaiting_image",
            Self::Terminated => "terminated",
        }
    }
}

/// One active conversation.
///
/// Created on the first event seen from a chat and discarded once it reaches
/// `Terminated`; nothing survives a process restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Set once at creation, immutable thereafter.
    pub user_id: UserId,
    pub state: SessionState,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            state: SessionState::AwaitingStart,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }
}
