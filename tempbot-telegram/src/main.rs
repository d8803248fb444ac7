//! Binary crate for the `tempbot` Telegram bot.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive credential configuration
//! - Logging setup and the Telegram polling loop

use clap::Parser;

mod cli;
mod logger;
mod telegram;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a local .env during development.
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
