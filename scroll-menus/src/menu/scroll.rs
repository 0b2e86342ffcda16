//! The scroll-page menu: ordered pages with injected navigation.

use std::sync::Arc;

use twilight_http::Client;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

use crate::event::ComponentEvent;
use crate::registry;
use crate::respond;

use super::DEFAULT_TIMEOUT_SECS;
use super::nav::build_nav_row;
use super::page::{MenuPage, resolve_jump_entry};
use super::token::{JumpToken, NavAction, NavToken, build_jump_custom_id, now_unix_secs};
use super::view::{MenuView, compose_page_view};

/// An ordered sequence of pre-rendered pages behind prev/jump/next controls.
///
/// The menu itself holds no current-page state: every navigation control
/// carries its `(owner, page)` pair inside its custom ID, so each render is
/// pure and concurrent viewers cannot interfere with each other.
pub struct ScrollPageMenu {
    id: u64,
    pages: Vec<MenuPage>,
    start_index: usize,
    timeout_secs: u64,
}

impl ScrollPageMenu {
    /// Create a menu starting at the first page.
    ///
    /// Fails on an empty page list.
    pub fn new(pages: Vec<MenuPage>) -> anyhow::Result<Self> {
        Self::starting_at(pages, 0)
    }

    /// Create a menu starting at the given zero-based page index.
    ///
    /// Fails on an empty page list or an out-of-range start index.
    pub fn starting_at(pages: Vec<MenuPage>, start_index: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(!pages.is_empty(), "a scroll menu needs at least one page");
        anyhow::ensure!(
            start_index < pages.len(),
            "start page {start_index} out of range for {} pages",
            pages.len()
        );

        Ok(Self {
            id: registry::next_menu_id(),
            pages,
            start_index,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Override the session timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Render the view for one `(owner, page)` pair.
    ///
    /// Pure given its inputs: the page's own rows are reconstructed and the
    /// navigation row, bound to exactly this owner and page, is prepended.
    pub fn render(&self, owner_id: u64, page_index: usize, expires_at: u64) -> MenuView {
        let page_index = page_index.min(self.pages.len() - 1);
        let nav_row = build_nav_row(
            self.id,
            page_index,
            self.pages.len(),
            owner_id,
            expires_at,
        );
        compose_page_view(&self.pages[page_index], nav_row)
    }

    /// Send the menu to a channel, restricted to `owner_id`, and start
    /// listening for its navigation interactions.
    pub async fn send(
        self,
        http: Arc<Client>,
        channel_id: Id<ChannelMarker>,
        owner_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        let now = now_unix_secs();
        let expires_at = now.saturating_add(self.timeout_secs);
        let view = self.render(owner_id.get(), self.start_index, expires_at);
        let menu_id = self.id;
        let timeout_secs = self.timeout_secs;

        let created_message = http
            .create_message(channel_id)
            .embeds(&view.embeds)
            .components(&view.components)
            .await?
            .model()
            .await?;

        registry::register_menu(menu_id, Arc::new(self), expires_at, now).await;
        respond::schedule_component_cleanup(
            Arc::clone(&http),
            created_message.channel_id,
            created_message.id,
            timeout_secs,
        )
        .await;

        Ok(())
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Act on a validated navigation press: flip pages, or open the jump
    /// modal for the middle control.
    pub(crate) async fn handle_nav(
        &self,
        event: &ComponentEvent,
        token: &NavToken,
    ) -> anyhow::Result<()> {
        let expires_at = now_unix_secs().saturating_add(self.timeout_secs);

        match token.action {
            NavAction::Jump => {
                let modal_id = build_jump_custom_id(
                    self.id,
                    self.page_count(),
                    token.owner_id,
                    expires_at,
                );
                respond::respond_jump_modal(
                    event.http(),
                    event.interaction(),
                    &modal_id,
                    self.page_count(),
                )
                .await
            }
            NavAction::Previous | NavAction::Next => {
                let view = self.render(token.owner_id, token.target_index, expires_at);
                event.update_message(&view).await?;
                self.refresh_cleanup(event).await;
                Ok(())
            }
        }
    }

    /// Act on a jump-modal submission: transition to a valid page, or show
    /// the invalid-page error and keep the current page.
    pub(crate) async fn handle_jump_submit(
        &self,
        event: &ComponentEvent,
        token: &JumpToken,
    ) -> anyhow::Result<()> {
        let raw_entry = event.text_input("page").unwrap_or("");

        match resolve_jump_entry(raw_entry, self.page_count()) {
            Ok(target_index) => {
                let expires_at = now_unix_secs().saturating_add(self.timeout_secs);
                let view = self.render(token.owner_id, target_index, expires_at);
                event.update_message(&view).await?;
                self.refresh_cleanup(event).await;
                Ok(())
            }
            Err(rejected) => {
                event
                    .reply_ephemeral(&respond::invalid_page_message(rejected.page_count))
                    .await
            }
        }
    }

    async fn refresh_cleanup(&self, event: &ComponentEvent) {
        if let Some(message) = event.interaction().message.as_ref() {
            respond::schedule_component_cleanup(
                Arc::clone(event.http()),
                message.channel_id,
                message.id,
                self.timeout_secs,
            )
            .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::nav::nav_buttons;
    use super::super::page::pages_from_items;
    use super::*;

    const OWNER: u64 = 42;
    const EXPIRES: u64 = 1_000;

    fn three_page_menu() -> ScrollPageMenu {
        let items: Vec<String> = (1..=3).map(|index| format!("entry {index}")).collect();
        let pages = pages_from_items("Entries", &items, 1).expect("pages build");
        ScrollPageMenu::new(pages).expect("menu builds")
    }

    #[test]
    fn construction_rejects_empty_pages_and_bad_start_index() {
        assert!(ScrollPageMenu::new(Vec::new()).is_err());

        let items = vec!["only".to_owned()];
        let pages = pages_from_items("Entries", &items, 1).expect("pages build");
        assert!(ScrollPageMenu::starting_at(pages, 1).is_err());
    }

    #[test]
    fn first_render_disables_previous_and_labels_the_page() {
        let menu = three_page_menu();
        let view = menu.render(OWNER, 0, EXPIRES);

        let buttons = nav_buttons(&view.components[0]);
        assert!(buttons[0].disabled);
        assert!(!buttons[2].disabled);
        assert_eq!(buttons[1].label.as_deref(), Some("Page 1/3"));
    }

    #[test]
    fn middle_render_enables_both_directions() {
        let menu = three_page_menu();
        let view = menu.render(OWNER, 1, EXPIRES);

        let buttons = nav_buttons(&view.components[0]);
        assert!(!buttons[0].disabled);
        assert!(!buttons[2].disabled);
        assert_eq!(buttons[1].label.as_deref(), Some("Page 2/3"));
    }

    #[test]
    fn jump_entries_transition_only_inside_bounds() {
        let menu = three_page_menu();

        assert!(resolve_jump_entry("5", menu.page_count()).is_err());
        assert_eq!(resolve_jump_entry("3", menu.page_count()), Ok(2));

        let view = menu.render(OWNER, 2, EXPIRES);
        let buttons = nav_buttons(&view.components[0]);
        assert!(buttons[2].disabled);
        assert_eq!(buttons[1].label.as_deref(), Some("Page 3/3"));
    }

    #[test]
    fn rendering_is_pure() {
        let menu = three_page_menu();

        let first = menu.render(OWNER, 1, EXPIRES);
        let second = menu.render(OWNER, 1, EXPIRES);

        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_render_clamps_to_the_last_page() {
        let menu = three_page_menu();
        let view = menu.render(OWNER, 9, EXPIRES);

        let buttons = nav_buttons(&view.components[0]);
        assert_eq!(buttons[1].label.as_deref(), Some("Page 3/3"));
    }
}
