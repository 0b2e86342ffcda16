use std::env;
use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use scroll_commands::{handle_interaction, handle_message};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN")?;

    // Single shared HTTP client, cloned into every handler
    let http = Arc::new(Client::new(token.clone()));

    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    // One gateway websocket connection
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("scroll-bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("scroll-bot is ready");
            }
            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(Arc::clone(&http), msg).await {
                    error!(?source, "message command failed");
                }
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(Arc::clone(&http), interaction).await {
                    error!(?source, "interaction handling failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
