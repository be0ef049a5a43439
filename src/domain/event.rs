use super::replies::Reply;
use super::session::{Submission, UserId};

/// Opaque handle to a platform-hosted file, resolved to bytes by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef(pub String);

/// Media types acceptable as the verifying image.
const IMAGE_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

/// What kind of attachment an inbound message carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    /// A native photo upload; the platform guarantees it is an image.
    Photo,
    /// A generic file upload with the declared media type.
    Document { mime: String },
}

impl AttachmentKind {
    pub fn is_image(&self) -> bool {
        match self {
            Self::Photo => true,
            Self::Document { mime } => IMAGE_MIME_TYPES.contains(&mime.as_str()),
        }
    }
}

/// An inbound conversation event, already stripped of platform types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Cancel,
    Text(String),
    Attachment { file: FileRef, kind: AttachmentKind },
    /// File bytes handed back by the driver after a
    /// [`Effect::RetrieveFile`] request.
    Retrieved { bytes: Vec<u8> },
    /// Anything else the platform can carry (stickers, voice notes, ...).
    Unsupported,
}

/// Everything forwarded to the fixed recipient. Assembled at the moment of
/// delivery and never persisted; the image buffer is dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub user_id: UserId,
    pub username: String,
    pub tx_url: String,
    pub image: Vec<u8>,
}

impl SubmissionPayload {
    pub fn assemble(user_id: UserId, submission: &Submission, image: Vec<u8>) -> Self {
        Self {
            user_id,
            username: submission.username.clone(),
            tx_url: submission.tx_url.clone(),
            image,
        }
    }

    /// Text summary sent to the recipient ahead of the image itself.
    pub fn summary(&self) -> String {
        format!(
            "New submission from user ID: {} (Username: {})\nTransaction URL: {}",
            self.user_id.0, self.username, self.tx_url
        )
    }

    /// Caption attached to the forwarded image document.
    pub fn caption(&self) -> String {
        format!(
            "Image from user ID: {} (Username: {})",
            self.user_id.0, self.username
        )
    }
}

/// Side effect requested by a transition, executed in order by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a reply to the originating conversation.
    Reply(Reply),
    /// Download the referenced file and feed the bytes back as
    /// [`Event::Retrieved`].
    RetrieveFile(FileRef),
    /// Deliver the payload to the fixed recipient, then confirm to the user.
    Forward(SubmissionPayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_mime_acceptance() {
        assert!(AttachmentKind::Photo.is_image());
        for mime in ["image/png", "image/jpeg", "image/gif"] {
            let kind = AttachmentKind::Document {
                mime: mime.to_string(),
            };
            assert!(kind.is_image(), "{mime} should be accepted");
        }
        for mime in ["image/webp", "application/pdf", "video/mp4", ""] {
            let kind = AttachmentKind::Document {
                mime: mime.to_string(),
            };
            assert!(!kind.is_image(), "{mime} should be rejected");
        }
    }

    #[test]
    fn test_payload_summary_and_caption() {
        let submission = Submission {
            username: "alice".to_string(),
            tx_url: "https://tx.example.com/abc".to_string(),
        };
        let payload = SubmissionPayload::assemble(UserId(42), &submission, vec![1, 2, 3]);

        assert_eq!(
            payload.summary(),
            "New submission from user ID: 42 (Username: alice)\n\
             Transaction URL: https://tx.example.com/abc"
        );
        assert_eq!(
            payload.caption(),
            "Image from user ID: 42 (Username: alice)"
        );
    }
}
