use crate::application::engine::ConversationEngine;
use crate::domain::event::{AttachmentKind, Event, FileRef};
use crate::domain::ports::DeliveryGateway;
use crate::domain::replies::Reply;
use crate::domain::session::{ConversationId, Sender, UserId};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::payloads::{SendDocumentSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode, Recipient};

/// Telegram adapter for the delivery gateway port.
///
/// Holds the fixed recipient identity; replies go wherever the engine
/// addresses them, forwarded submissions always go to the recipient.
pub struct TelegramGateway {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramGateway {
    pub fn new(bot: Bot, recipient: &str) -> Self {
        Self {
            bot,
            recipient: parse_recipient(recipient),
        }
    }
}

/// Accepts either a numeric chat id or a username; a missing `@` prefix on a
/// username is added, as the Bot API requires it.
fn parse_recipient(raw: &str) -> Recipient {
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if raw.starts_with('@') => Recipient::ChannelUsername(raw.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{raw}")),
    }
}

fn gateway_err(e: impl std::fmt::Display) -> BotError {
    BotError::Gateway(e.to_string())
}

#[async_trait]
impl DeliveryGateway for TelegramGateway {
    async fn send_text(&self, chat: ConversationId, text: String, markdown: bool) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat.0), text);
        let request = if markdown {
            request.parse_mode(ParseMode::Markdown)
        } else {
            request
        };
        request.await.map_err(gateway_err)?;
        Ok(())
    }

    async fn retrieve_file(&self, file: &FileRef) -> Result<Vec<u8>> {
        let meta = self.bot.get_file(file.0.clone()).await.map_err(gateway_err)?;
        let mut buf = std::io::Cursor::new(Vec::new());
        self.bot
            .download_file(&meta.path, &mut buf)
            .await
            .map_err(gateway_err)?;
        Ok(buf.into_inner())
    }

    async fn forward_summary(&self, text: String) -> Result<()> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map_err(gateway_err)?;
        Ok(())
    }

    async fn forward_document(&self, bytes: Vec<u8>, caption: String) -> Result<()> {
        let document = InputFile::memory(bytes).file_name("proof");
        self.bot
            .send_document(self.recipient.clone(), document)
            .caption(caption)
            .await
            .map_err(gateway_err)?;
        Ok(())
    }
}

/// Maps a Telegram message onto a domain event, or `None` for input the bot
/// never reacts to (unknown commands, messages without a sender).
fn classify(msg: &Message) -> Option<(Sender, Event)> {
    let from = msg.from()?;
    let sender = Sender {
        user_id: UserId(from.id.0),
        username: from.username.clone(),
    };

    let event = if let Some(text) = msg.text() {
        match command(text) {
            Some("start") => Event::Start,
            Some("cancel") => Event::Cancel,
            Some(_) => return None,
            None => Event::Text(text.to_string()),
        }
    } else if let Some(photos) = msg.photo() {
        // Telegram offers several resolutions; the last entry is the largest.
        let photo = photos.last()?;
        Event::Attachment {
            file: FileRef(photo.file.id.clone()),
            kind: AttachmentKind::Photo,
        }
    } else if let Some(doc) = msg.document() {
        let mime = doc
            .mime_type
            .as_ref()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        Event::Attachment {
            file: FileRef(doc.file.id.clone()),
            kind: AttachmentKind::Document { mime },
        }
    } else {
        Event::Unsupported
    };

    Some((sender, event))
}

/// Extracts the command name from `/cmd` or `/cmd@botname` text.
fn command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let first = rest.split_whitespace().next().unwrap_or("");
    Some(first.split('@').next().unwrap_or(first))
}

/// Top-level handler for one inbound message.
///
/// Any error escaping the engine is logged with the chat context and
/// reported to the user as a generic error; the process never crashes and
/// the stored session is left unchanged.
async fn on_message(
    bot: Bot,
    msg: Message,
    engine: Arc<ConversationEngine>,
) -> ResponseResult<()> {
    let Some((sender, event)) = classify(&msg) else {
        return Ok(());
    };

    let chat = ConversationId(msg.chat.id.0);
    if let Err(e) = engine.handle(chat, sender, event).await {
        log::error!("chat {}: event handling failed: {}", chat.0, e);
        let text = Reply::InternalError.render(engine.messages());
        if let Err(send_err) = bot.send_message(msg.chat.id, text).await {
            log::error!("chat {}: could not report error to user: {}", chat.0, send_err);
        }
    }
    Ok(())
}

/// Runs the long-polling dispatcher until the process is interrupted.
pub async fn run_polling(bot: Bot, engine: Arc<ConversationEngine>) {
    log::info!("Starting bot polling");
    let handler = Update::filter_message().endpoint(on_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
