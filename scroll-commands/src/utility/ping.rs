use std::sync::Arc;

use twilight_http::Client;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong!",
    usage: "!ping",
};

/// Send a simple connectivity response.
pub async fn run(http: Arc<Client>, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    http.create_message(msg.channel_id).content("Pong!").await?;

    Ok(())
}
