use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Gateway error: {0}")]
    Gateway(String),
    #[error("Session store error: {0}")]
    Store(String),
}
