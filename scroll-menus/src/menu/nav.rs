//! Navigation row construction (previous / current / next controls).

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::token::{NavAction, build_nav_custom_id};

/// Build the three-control navigation row for one `(owner, page)` render.
///
/// The middle control shows `Page i/N` and opens the jump modal; it is
/// disabled when there is nothing to jump to. Previous/next are disabled at
/// the respective edges.
pub(crate) fn build_nav_row(
    menu_id: u64,
    page_index: usize,
    page_count: usize,
    owner_id: u64,
    expires_at: u64,
) -> Component {
    let prev_target = page_index.saturating_sub(1);
    let next_target = (page_index + 1).min(page_count.saturating_sub(1));

    let prev_button = Button {
        id: None,
        custom_id: Some(build_nav_custom_id(
            menu_id,
            NavAction::Previous,
            prev_target,
            page_count,
            owner_id,
            expires_at,
        )),
        disabled: page_index == 0,
        emoji: None,
        label: Some("◀ Prev".to_owned()),
        style: ButtonStyle::Primary,
        url: None,
        sku_id: None,
    };

    let jump_button = Button {
        id: None,
        custom_id: Some(build_nav_custom_id(
            menu_id,
            NavAction::Jump,
            page_index,
            page_count,
            owner_id,
            expires_at,
        )),
        disabled: page_count <= 1,
        emoji: None,
        label: Some(format!("Page {}/{}", page_index + 1, page_count)),
        style: ButtonStyle::Secondary,
        url: None,
        sku_id: None,
    };

    let next_button = Button {
        id: None,
        custom_id: Some(build_nav_custom_id(
            menu_id,
            NavAction::Next,
            next_target,
            page_count,
            owner_id,
            expires_at,
        )),
        disabled: page_index + 1 >= page_count,
        emoji: None,
        label: Some("Next ▶".to_owned()),
        style: ButtonStyle::Primary,
        url: None,
        sku_id: None,
    };

    Component::ActionRow(ActionRow {
        id: None,
        components: vec![
            Component::Button(prev_button),
            Component::Button(jump_button),
            Component::Button(next_button),
        ],
    })
}

#[cfg(test)]
pub(crate) fn nav_buttons(row: &Component) -> Vec<&Button> {
    let Component::ActionRow(action_row) = row else {
        panic!("navigation row is not an action row");
    };
    action_row
        .components
        .iter()
        .map(|component| {
            let Component::Button(button) = component else {
                panic!("navigation row holds a non-button component");
            };
            button
        })
        .collect()
}
