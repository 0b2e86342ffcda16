use std::sync::Arc;

use twilight_http::Client;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMANDS, CommandMeta};
use scroll_menus::menu::{ScrollPageMenu, pages_from_items};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists available commands.",
    usage: "!help [page]",
};

const COMMANDS_PER_PAGE: usize = 5;

/// Render the command catalog as a scroll menu, optionally opened at a page.
pub async fn run(http: Arc<Client>, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let items: Vec<String> = COMMANDS
        .iter()
        .map(|command| format!("`{}`: {}", command.usage, command.desc))
        .collect();

    let pages = pages_from_items("Commands", &items, COMMANDS_PER_PAGE)?;
    let page_count = pages.len();

    let start_index = match arg1 {
        Some(raw) => {
            match raw
                .parse::<usize>()
                .ok()
                .filter(|page| (1..=page_count).contains(page))
            {
                Some(page) => page - 1,
                None => {
                    let out = format!("Page must be a number between 1 and {page_count}.");
                    http.create_message(msg.channel_id).content(&out).await?;
                    return Ok(());
                }
            }
        }
        None => 0,
    };

    ScrollPageMenu::starting_at(pages, start_index)?
        .send(http, msg.channel_id, msg.author.id)
        .await
}
