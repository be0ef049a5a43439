use clap::Parser;
use miette::{Result, bail};
use proofbot::application::engine::ConversationEngine;
use proofbot::domain::ports::{DeliveryGatewayBox, SessionStoreBox};
use proofbot::domain::replies::MessageContext;
use proofbot::infrastructure::in_memory::InMemorySessionStore;
use proofbot::infrastructure::telegram::{self, TelegramGateway};
use std::sync::Arc;
use teloxide::Bot;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bot authentication token; the process refuses to start without one
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Fixed recipient for collected submissions (@username or numeric chat id)
    #[arg(long, env = "PROOF_RECIPIENT", default_value = "@Kerverossui")]
    recipient: String,

    /// TON wallet address embedded in the welcome message
    #[arg(
        long,
        default_value = "UQBW2B1gjQBydPp2qMphelacZMQ26kna4W0p0NuzDYSuJlyP"
    )]
    ton_address: String,

    /// SOL wallet address embedded in the welcome message
    #[arg(long, default_value = "8CvnXzMuKWN2gzAp75PeGHKqks2RhPnoVChpu7aRcVjN")]
    sol_address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.bot_token.trim().is_empty() {
        bail!("BOT_TOKEN must not be empty");
    }

    let messages = MessageContext {
        ton_address: cli.ton_address,
        sol_address: cli.sol_address,
        recipient: cli.recipient.clone(),
    };

    let bot = Bot::new(cli.bot_token);
    let gateway: DeliveryGatewayBox = Box::new(TelegramGateway::new(bot.clone(), &cli.recipient));
    let sessions: SessionStoreBox = Box::new(InMemorySessionStore::new());
    let engine = Arc::new(ConversationEngine::new(gateway, sessions, messages));

    telegram::run_polling(bot, engine).await;
    Ok(())
}
