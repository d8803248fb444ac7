//! Core library for the `tempbot` Telegram bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the weather provider
//! - Shared domain models (messages, reports)
//! - The command dispatcher mapping message text to reply text
//!
//! It is used by `tempbot-telegram`, but can also be reused by other binaries or services.

pub mod config;
pub mod dispatch;
pub mod model;
pub mod provider;

pub use config::Config;
pub use dispatch::{Command, DEFAULT_CITY, Dispatcher, WELCOME};
pub use model::{IncomingMessage, WeatherReport};
pub use provider::{FetchError, WeatherProvider, WeatherstackProvider, provider_from_config};
