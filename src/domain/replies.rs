/// Configuration data rendered into user-facing text: the two wallet
/// addresses shown in the welcome message and the fixed recipient identity
/// named in the confirmations.
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub ton_address: String,
    pub sol_address: String,
    pub recipient: String,
}

/// Every text the bot can send back to the originating conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Welcome,
    AskForImage,
    InvalidUrl,
    NotAnImage,
    BadGeometry,
    ProcessingFailed,
    ForwardingDone,
    ForwardingFailed,
    Cancelled,
    InternalError,
}

impl Reply {
    /// Whether the rendered text uses Markdown formatting.
    pub fn markdown(&self) -> bool {
        matches!(self, Self::Welcome)
    }

    pub fn render(&self, ctx: &MessageContext) -> String {
        match self {
            Self::Welcome => format!(
                "Welcome! Please send 2.5 TON or 0.06 SOL to the following addresses:\n\n\
                 **TON**: `{}`\n\
                 **SOL**: `{}`\n\n\
                 After making the payment, please provide a valid URL for the \
                 transaction payment proof.",
                ctx.ton_address, ctx.sol_address
            ),
            Self::AskForImage => "Thank you for providing the transaction URL. \
                 Now, please upload a square image (PNG, JPG, or GIF) with a \
                 minimum size of 200x200 pixels."
                .to_string(),
            Self::InvalidUrl => {
                "Please provide a valid URL for the transaction proof.".to_string()
            }
            Self::NotAnImage => "Please upload a valid image (PNG, JPG, or GIF).".to_string(),
            Self::BadGeometry => "The image must be square (equal width and height) and at \
                 least 200x200 pixels. Please upload a valid image."
                .to_string(),
            Self::ProcessingFailed => "Error processing the image. Please try again.".to_string(),
            Self::ForwardingDone => format!(
                "Image received successfully! All information has been sent to {}. \
                 Thank you for completing the process.",
                ctx.recipient
            ),
            Self::ForwardingFailed => format!(
                "Image received, but there was an error sending the information \
                 to {}. Please contact support.",
                ctx.recipient
            ),
            Self::Cancelled => {
                "Operation cancelled. You can start again with /start.".to_string()
            }
            Self::InternalError => {
                "An error occurred. Please try again or contact support.".to_string()
            }
        }
    }
}
