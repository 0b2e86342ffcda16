use std::sync::Arc;

use twilight_http::Client;
use twilight_model::channel::message::component::{
    Component, SelectMenu, SelectMenuOption, SelectMenuType,
};
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use scroll_menus::embed::build_menu_embed;
use scroll_menus::event::ComponentEvent;
use scroll_menus::guard::Guarded;
use scroll_menus::menu::DEFAULT_TIMEOUT_SECS;
use scroll_menus::respond::send_guarded_message;

pub const META: CommandMeta = CommandMeta {
    name: "choose",
    desc: "Pick a color from a menu only you can use.",
    usage: "!choose",
};

const COLORS: [&str; 4] = ["Red", "Green", "Blue", "Purple"];

/// Send a select menu restricted to the command author.
pub async fn run(http: Arc<Client>, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let custom_id = format!("choose:{}", msg.id.get());

    let options = COLORS
        .iter()
        .map(|color| SelectMenuOption {
            default: false,
            description: None,
            emoji: None,
            label: (*color).to_owned(),
            value: color.to_ascii_lowercase(),
        })
        .collect();

    let select = Component::SelectMenu(SelectMenu {
        channel_types: None,
        custom_id,
        default_values: None,
        disabled: false,
        id: None,
        kind: SelectMenuType::Text,
        max_values: None,
        min_values: None,
        options: Some(options),
        placeholder: Some("Pick a color...".to_owned()),
        required: None,
    });

    let control = Guarded::user(msg.author.id, select, |event: ComponentEvent| async move {
        let picked = event.select_values().first().cloned().unwrap_or_default();
        event.reply_ephemeral(&format!("You picked {picked}.")).await
    });

    let embed = build_menu_embed("Color Pick", "Only the command author can use this menu.")?;

    send_guarded_message(
        http,
        msg.channel_id,
        vec![embed],
        vec![control],
        DEFAULT_TIMEOUT_SECS,
    )
    .await
}
