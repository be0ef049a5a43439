use async_trait::async_trait;
use proofbot::domain::event::FileRef;
use proofbot::domain::ports::DeliveryGateway;
use proofbot::domain::session::ConversationId;
use proofbot::error::{BotError, Result};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Everything the engine asked the gateway to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    SendText {
        chat: i64,
        text: String,
        markdown: bool,
    },
    RetrieveFile {
        file: String,
    },
    ForwardSummary {
        text: String,
    },
    ForwardDocument {
        caption: String,
        bytes_len: usize,
    },
}

/// Recording fake of the platform gateway.
///
/// Clones share the same call log and staged files, so a test keeps one
/// handle for assertions and boxes another for the engine.
#[derive(Default, Clone)]
pub struct RecordingGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_documents: Arc<AtomicBool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the given file id downloadable.
    pub fn stage_file(&self, id: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(id.to_string(), bytes);
    }

    /// Makes every subsequent document send fail.
    pub fn fail_document_sends(&self) {
        self.fail_documents.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts sent to the given conversation, in order.
    pub fn texts_to(&self, chat: i64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendText { chat: c, text, .. } if c == chat => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Number of calls addressed to the fixed recipient.
    pub fn delivery_calls(&self) -> usize {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    GatewayCall::ForwardSummary { .. } | GatewayCall::ForwardDocument { .. }
                )
            })
            .count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DeliveryGateway for RecordingGateway {
    async fn send_text(&self, chat: ConversationId, text: String, markdown: bool) -> Result<()> {
        self.record(GatewayCall::SendText {
            chat: chat.0,
            text,
            markdown,
        });
        Ok(())
    }

    async fn retrieve_file(&self, file: &FileRef) -> Result<Vec<u8>> {
        self.record(GatewayCall::RetrieveFile {
            file: file.0.clone(),
        });
        self.files
            .lock()
            .unwrap()
            .get(&file.0)
            .cloned()
            .ok_or_else(|| BotError::Gateway(format!("no such file: {}", file.0)))
    }

    async fn forward_summary(&self, text: String) -> Result<()> {
        self.record(GatewayCall::ForwardSummary { text });
        Ok(())
    }

    async fn forward_document(&self, bytes: Vec<u8>, caption: String) -> Result<()> {
        self.record(GatewayCall::ForwardDocument {
            caption,
            bytes_len: bytes.len(),
        });
        if self.fail_documents.load(Ordering::SeqCst) {
            return Err(BotError::Gateway(
                "send_document: network unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Encodes a solid-colour PNG of the given dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
