use crate::domain::event::{Effect, Event, SubmissionPayload};
use crate::domain::machine;
use crate::domain::ports::{DeliveryGatewayBox, SessionStoreBox};
use crate::domain::replies::{MessageContext, Reply};
use crate::domain::session::{ConversationId, Sender, Session};
use crate::error::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The main entry point for conversation event processing.
///
/// `ConversationEngine` owns the platform ports and executes the effects
/// requested by the pure transition function: replies to the originating
/// chat, file retrieval, and submission forwarding. Events for the same
/// conversation are processed strictly one at a time; distinct conversations
/// proceed independently.
pub struct ConversationEngine {
    gateway: DeliveryGatewayBox,
    sessions: SessionStoreBox,
    messages: MessageContext,
    // One guard per conversation so concurrent updates for the same chat
    // cannot interleave.
    guards: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl ConversationEngine {
    pub fn new(
        gateway: DeliveryGatewayBox,
        sessions: SessionStoreBox,
        messages: MessageContext,
    ) -> Self {
        Self {
            gateway,
            sessions,
            messages,
            guards: Mutex::new(HashMap::new()),
        }
    }

    /// The text configuration in effect, for rendering replies outside the
    /// engine (the top-level error path).
    pub fn messages(&self) -> &MessageContext {
        &self.messages
    }

    /// Handles one inbound event for one conversation.
    ///
    /// An error returned from here means the event had no effect on the
    /// stored session: the store is only written after every effect of the
    /// event has been executed.
    pub async fn handle(&self, chat: ConversationId, sender: Sender, event: Event) -> Result<()> {
        let guard = self.guard(chat).await;
        let _held = guard.lock().await;

        let mut session = self
            .sessions
            .get(chat)
            .await?
            .unwrap_or_else(|| Session::new(sender.user_id));

        // A RetrieveFile effect feeds a follow-up event back into the
        // machine, so transitions run off a small queue.
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let step = machine::transition(&session, &sender, event);
            if step.next != session.state {
                log::info!(
                    "chat {}: user {}: {} -> {}",
                    chat.0,
                    session.user_id.0,
                    session.state.name(),
                    step.next.name()
                );
            }
            session.state = step.next;

            for effect in step.effects {
                match effect {
                    Effect::Reply(reply) => {
                        self.gateway
                            .send_text(chat, reply.render(&self.messages), reply.markdown())
                            .await?;
                    }
                    Effect::RetrieveFile(file) => {
                        // A failed retrieval aborts the event before any
                        // bytes exist; the session is left as it was.
                        let bytes = self.gateway.retrieve_file(&file).await?;
                        pending.push_back(Event::Retrieved { bytes });
                    }
                    Effect::Forward(payload) => {
                        self.forward(chat, payload).await?;
                    }
                }
            }
        }

        if session.is_terminated() {
            self.sessions.remove(chat).await?;
        } else {
            self.sessions.put(chat, session).await?;
        }
        Ok(())
    }

    /// Delivers a validated submission to the fixed recipient.
    ///
    /// A failed delivery is logged and reported to the user as a degraded
    /// success; it is not retried and does not keep the session alive.
    async fn forward(&self, chat: ConversationId, payload: SubmissionPayload) -> Result<()> {
        let summary = payload.summary();
        let caption = payload.caption();
        let user_id = payload.user_id;

        let delivery: Result<()> = async {
            self.gateway.forward_summary(summary).await?;
            self.gateway.forward_document(payload.image, caption).await
        }
        .await;

        let confirmation = match delivery {
            Ok(()) => {
                log::info!(
                    "forwarded submission for user {} to {}",
                    user_id.0,
                    self.messages.recipient
                );
                Reply::ForwardingDone
            }
            Err(e) => {
                log::error!(
                    "failed to forward submission for user {} to {}: {}",
                    user_id.0,
                    self.messages.recipient,
                    e
                );
                Reply::ForwardingFailed
            }
        };

        self.gateway
            .send_text(chat, confirmation.render(&self.messages), false)
            .await
    }

    async fn guard(&self, chat: ConversationId) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().await;
        guards.entry(chat.0).or_default().clone()
    }
}
