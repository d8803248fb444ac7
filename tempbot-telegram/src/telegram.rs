//! Telegram transport: long-polling loop feeding the dispatcher.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info};

use tempbot_core::{Dispatcher, IncomingMessage};

/// Starts long polling with the given token and dispatcher, running until the
/// process is interrupted.
///
/// Each update is handled independently and shares no mutable state; a failed
/// send is logged by the REPL's error handler and never stops the loop.
pub async fn run_bot(token: String, dispatcher: Dispatcher) -> Result<()> {
    let bot = Bot::new(token);

    match bot.get_me().await {
        Ok(me) => info!(username = %me.username(), "authorized"),
        Err(err) => error!(error = %err, "get_me failed; check the bot token"),
    }

    let dispatcher = Arc::new(dispatcher);

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let dispatcher = dispatcher.clone();

        async move {
            // Updates without text (stickers, joins, ...) get no reply.
            let Some(text) = msg.text() else {
                return Ok(());
            };

            let incoming = IncomingMessage {
                chat_id: msg.chat.id.0,
                text: text.to_owned(),
            };

            info!(chat_id = incoming.chat_id, text = %incoming.text, "received message");

            let reply = dispatcher.dispatch(&incoming).await;
            bot.send_message(msg.chat.id, reply).await?;

            Ok(())
        }
    })
    .await;

    Ok(())
}
