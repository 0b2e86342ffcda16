//! Inbound interaction routing for menus and guarded components.

use std::sync::Arc;

use tracing::debug;
use twilight_http::Client;
use twilight_model::gateway::payload::incoming::InteractionCreate;

use crate::event::{ComponentEvent, EventActor};
use crate::guard::NOT_ALLOWED_MESSAGE;
use crate::menu::token::{
    NavValidationError, is_jump_custom_id, is_nav_custom_id, now_unix_secs,
    validate_jump_custom_id, validate_nav_custom_id,
};
use crate::registry;
use crate::respond::{MENU_EXPIRED_MESSAGE, MENU_INVALID_MESSAGE, MISSING_ACTOR_MESSAGE};

/// Route an inbound interaction to the menu or guarded control it targets.
///
/// Returns `Ok(true)` when the interaction was handled (including handled
/// rejections) and `Ok(false)` when it belongs to nobody in this layer.
pub async fn handle_interaction(
    http: &Arc<Client>,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<bool> {
    let event = ComponentEvent::new(Arc::clone(http), interaction);
    let Some(custom_id) = event.custom_id().map(ToOwned::to_owned) else {
        return Ok(false);
    };

    if is_nav_custom_id(&custom_id) {
        handle_nav_interaction(&event, &custom_id).await?;
        return Ok(true);
    }

    if is_jump_custom_id(&custom_id) {
        handle_jump_interaction(&event, &custom_id).await?;
        return Ok(true);
    }

    if let Some(control) = registry::lookup_component(&custom_id, now_unix_secs()).await {
        control.handle(event).await?;
        return Ok(true);
    }

    debug!(%custom_id, "unrouted component interaction");
    Ok(false)
}

async fn handle_nav_interaction(event: &ComponentEvent, custom_id: &str) -> anyhow::Result<()> {
    let Some(actor) = event.actor_id() else {
        return event.reply_ephemeral(MISSING_ACTOR_MESSAGE).await;
    };

    let now = now_unix_secs();
    let token = match validate_nav_custom_id(custom_id, actor.get(), now) {
        Ok(token) => token,
        Err(NavValidationError::WrongUser) => {
            return event.reply_ephemeral(NOT_ALLOWED_MESSAGE).await;
        }
        Err(NavValidationError::Expired) => {
            return event.reply_ephemeral(MENU_EXPIRED_MESSAGE).await;
        }
        Err(_) => return event.reply_ephemeral(MENU_INVALID_MESSAGE).await,
    };

    let Some(menu) = registry::lookup_menu(token.menu_id, now).await else {
        return event.reply_ephemeral(MENU_EXPIRED_MESSAGE).await;
    };

    menu.handle_nav(event, &token).await?;
    registry::touch_menu(token.menu_id, now.saturating_add(menu.timeout_secs())).await;

    Ok(())
}

async fn handle_jump_interaction(event: &ComponentEvent, custom_id: &str) -> anyhow::Result<()> {
    let Some(actor) = event.actor_id() else {
        return event.reply_ephemeral(MISSING_ACTOR_MESSAGE).await;
    };

    let now = now_unix_secs();
    let token = match validate_jump_custom_id(custom_id, actor.get(), now) {
        Ok(token) => token,
        Err(NavValidationError::WrongUser) => {
            return event.reply_ephemeral(NOT_ALLOWED_MESSAGE).await;
        }
        Err(NavValidationError::Expired) => {
            return event.reply_ephemeral(MENU_EXPIRED_MESSAGE).await;
        }
        Err(_) => return event.reply_ephemeral(MENU_INVALID_MESSAGE).await,
    };

    let Some(menu) = registry::lookup_menu(token.menu_id, now).await else {
        return event.reply_ephemeral(MENU_EXPIRED_MESSAGE).await;
    };

    menu.handle_jump_submit(event, &token).await?;
    registry::touch_menu(token.menu_id, now.saturating_add(menu.timeout_secs())).await;

    Ok(())
}
