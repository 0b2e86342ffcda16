//! Renderable menu views.

use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;

use super::page::MenuPage;

/// A complete menu view: embed content plus interactive components.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub embeds: Vec<Embed>,
    pub components: Vec<Component>,
}

/// Compose a display view for a page: the navigation row goes first,
/// followed by the page's own rows.
pub(crate) fn compose_page_view(page: &MenuPage, nav_row: Component) -> MenuView {
    let mut components = Vec::with_capacity(page.rows.len() + 1);
    components.push(nav_row);
    components.extend(page.rows.iter().cloned());

    MenuView {
        embeds: vec![page.embed.clone()],
        components,
    }
}
