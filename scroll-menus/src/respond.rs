//! Interaction response helpers and outbound menu sends.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
    time::Duration,
};

use tracing::debug;
use twilight_http::Client;
use twilight_model::{
    channel::message::{
        MessageFlags,
        component::{ActionRow, Component, TextInput, TextInputStyle},
        embed::Embed,
    },
    gateway::payload::incoming::InteractionCreate,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use crate::event::ComponentEvent;
use crate::guard::Guarded;
use crate::menu::token::now_unix_secs;
use crate::registry;

type CleanupTaskMap = HashMap<u64, tokio::task::JoinHandle<()>>;

fn cleanup_tasks() -> &'static tokio::sync::Mutex<CleanupTaskMap> {
    static TASKS: OnceLock<tokio::sync::Mutex<CleanupTaskMap>> = OnceLock::new();
    TASKS.get_or_init(|| tokio::sync::Mutex::new(HashMap::new()))
}

/// Shown when a menu interaction arrives after its session expired.
pub const MENU_EXPIRED_MESSAGE: &str = "This menu expired. Run the command again.";
/// Shown when a menu interaction payload cannot be understood.
pub const MENU_INVALID_MESSAGE: &str = "Invalid menu interaction.";
/// Shown when the platform did not supply an acting user.
pub const MISSING_ACTOR_MESSAGE: &str = "Unable to determine interaction user.";

/// User-visible rejection for a jump entry that names no existing page.
pub fn invalid_page_message(page_count: usize) -> String {
    format!("Invalid page number. Enter a page between 1 and {page_count}.")
}

/// Respond to a component interaction with an in-place message update.
pub async fn respond_update_message(
    http: &Client,
    interaction: &InteractionCreate,
    embeds: &[Embed],
    components: &[Component],
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(
            InteractionResponseDataBuilder::new()
                .embeds(embeds.to_vec())
                .components(components.to_vec())
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Respond to an interaction with an ephemeral message.
pub async fn respond_ephemeral_message(
    http: &Client,
    interaction: &InteractionCreate,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Open the jump-to-page modal for a menu session.
#[allow(deprecated)]
pub(crate) async fn respond_jump_modal(
    http: &Client,
    interaction: &InteractionCreate,
    modal_custom_id: &str,
    page_count: usize,
) -> anyhow::Result<()> {
    let page_input = Component::TextInput(TextInput {
        id: None,
        custom_id: "page".to_owned(),
        label: Some("Page Number".to_owned()),
        max_length: Some(6),
        min_length: Some(1),
        placeholder: Some(format!("Enter a page from 1 to {page_count}")),
        required: Some(true),
        style: TextInputStyle::Short,
        value: None,
    });

    let modal_components = vec![Component::ActionRow(ActionRow {
        id: None,
        components: vec![page_input],
    })];

    let response = InteractionResponse {
        kind: InteractionResponseType::Modal,
        data: Some(InteractionResponseData {
            components: Some(modal_components),
            custom_id: Some(modal_custom_id.to_owned()),
            title: Some("Jump to Page".to_owned()),
            ..InteractionResponseData::default()
        }),
    };

    http.interaction(interaction.application_id)
        .create_response(interaction.id, &interaction.token, &response)
        .await?;

    Ok(())
}

/// Send a message carrying guarded controls and start listening for them.
///
/// Each control becomes its own action row. The controls stay registered for
/// `timeout_secs`; shortly before that the rows are stripped from the message.
pub async fn send_guarded_message(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    embeds: Vec<Embed>,
    controls: Vec<Guarded<ComponentEvent>>,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let now = now_unix_secs();
    let expires_at = now.saturating_add(timeout_secs);

    let mut rows = Vec::with_capacity(controls.len());
    let mut registrations = Vec::with_capacity(controls.len());
    for control in controls {
        let Some(custom_id) = control.custom_id().map(ToOwned::to_owned) else {
            anyhow::bail!("guarded control has no custom id to listen on");
        };
        rows.push(Component::ActionRow(ActionRow {
            id: None,
            components: vec![control.control().clone()],
        }));
        registrations.push((custom_id, Arc::new(control)));
    }

    let created_message = http
        .create_message(channel_id)
        .embeds(&embeds)
        .components(&rows)
        .await?
        .model()
        .await?;

    for (custom_id, control) in registrations {
        registry::register_component(custom_id, control, expires_at, now).await;
    }

    schedule_component_cleanup(
        Arc::clone(&http),
        created_message.channel_id,
        created_message.id,
        timeout_secs,
    )
    .await;

    Ok(())
}

/// Schedule removal of a message's interactive components shortly before
/// its session times out. Re-scheduling the same message resets the timer.
pub(crate) async fn schedule_component_cleanup(
    http: Arc<Client>,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
    timeout_secs: u64,
) {
    let delay_secs = timeout_secs.saturating_sub(1);
    let message_key = message_id.get();

    let mut tasks = cleanup_tasks().lock().await;
    if let Some(existing_task) = tasks.remove(&message_key) {
        existing_task.abort();
    }

    let cleanup_task = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;

        // The strip is best-effort: a failed edit is logged and dropped,
        // never retried. Stale controls are rejected by token expiry anyway.
        let empty_components: [Component; 0] = [];
        if let Err(source) = http
            .update_message(channel_id, message_id)
            .components(Some(&empty_components))
            .await
        {
            debug!(?source, "menu component cleanup edit failed");
        }

        let mut tasks = cleanup_tasks().lock().await;
        tasks.remove(&message_key);
    });

    tasks.insert(message_key, cleanup_task);
}
