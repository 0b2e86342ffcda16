pub mod utility;

use std::sync::Arc;

use twilight_http::Client;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';

/// Global command metadata.
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::choose::META,
    // Add new commands here
];

pub async fn handle_message(http: Arc<Client>, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let content = content_owned.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let arg1 = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match cmd.as_str() {
        "ping" => utility::ping::run(http, msg).await?,
        "help" => utility::help::run(http, msg, arg1).await?,
        "choose" => utility::choose::run(http, msg).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

pub async fn handle_interaction(
    http: Arc<Client>,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let handled = scroll_menus::dispatch::handle_interaction(&http, interaction).await?;
    if !handled {
        tracing::debug!("interaction not addressed to any live menu");
    }

    Ok(())
}
