use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tempbot_core::{Config, Dispatcher, provider_from_config};

use crate::{logger, telegram};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tempbot", version, about = "Telegram temperature bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Telegram bot token and the Weatherstack API key.
    Configure,

    /// Start the bot and poll for updates until interrupted.
    Run {
        /// Telegram bot token; overrides the config file and BOT_TOKEN.
        #[arg(long)]
        token: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { token } => run(token).await,
        }
    }
}

/// Prompt for both credentials and write them to the config file.
/// Empty answers keep whatever the file already holds.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let bot_token = inquire::Password::new("Telegram bot token:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current value")
        .prompt()?;
    if !bot_token.is_empty() {
        config.set_bot_token(bot_token);
    }

    let api_key = inquire::Password::new("Weatherstack API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current value")
        .prompt()?;
    if !api_key.is_empty() {
        config.set_weather_api_key(api_key);
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn run(token: Option<String>) -> anyhow::Result<()> {
    logger::init_tracing()?;

    let mut config = Config::load()?;
    if let Some(token) = token {
        config.set_bot_token(token);
    }

    // Both credentials are required up front; fail before touching the network.
    let bot_token = config.bot_token()?.to_owned();
    let provider =
        provider_from_config(&config).context("Cannot start without weather credentials")?;

    let dispatcher = Dispatcher::new(Arc::new(provider));

    telegram::run_bot(bot_token, dispatcher).await
}
