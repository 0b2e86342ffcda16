//! Process-wide tables of live menus and guarded components.
//!
//! Entries carry an expiry timestamp and are swept lazily: inserts drop
//! every stale entry, lookups drop the entry they hit when it has expired.

use std::{
    collections::HashMap,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::Mutex;

use crate::event::ComponentEvent;
use crate::guard::Guarded;
use crate::menu::ScrollPageMenu;

struct MenuEntry {
    menu: Arc<ScrollPageMenu>,
    expires_at: u64,
}

struct ComponentEntry {
    control: Arc<Guarded<ComponentEvent>>,
    expires_at: u64,
}

fn menus() -> &'static Mutex<HashMap<u64, MenuEntry>> {
    static MENUS: OnceLock<Mutex<HashMap<u64, MenuEntry>>> = OnceLock::new();
    MENUS.get_or_init(|| Mutex::new(HashMap::new()))
}

fn components() -> &'static Mutex<HashMap<String, ComponentEntry>> {
    static COMPONENTS: OnceLock<Mutex<HashMap<String, ComponentEntry>>> = OnceLock::new();
    COMPONENTS.get_or_init(|| Mutex::new(HashMap::new()))
}

static NEXT_MENU_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a fresh menu id for token routing.
pub(crate) fn next_menu_id() -> u64 {
    NEXT_MENU_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) async fn register_menu(
    menu_id: u64,
    menu: Arc<ScrollPageMenu>,
    expires_at: u64,
    now_unix: u64,
) {
    let mut table = menus().lock().await;
    table.retain(|_, entry| entry.expires_at >= now_unix);
    table.insert(menu_id, MenuEntry { menu, expires_at });
}

pub(crate) async fn lookup_menu(menu_id: u64, now_unix: u64) -> Option<Arc<ScrollPageMenu>> {
    let mut table = menus().lock().await;
    match table.get(&menu_id) {
        Some(entry) if entry.expires_at >= now_unix => Some(Arc::clone(&entry.menu)),
        Some(_) => {
            table.remove(&menu_id);
            None
        }
        None => None,
    }
}

/// Extend a live menu's registration after a successful interaction.
pub(crate) async fn touch_menu(menu_id: u64, expires_at: u64) {
    let mut table = menus().lock().await;
    if let Some(entry) = table.get_mut(&menu_id) {
        entry.expires_at = entry.expires_at.max(expires_at);
    }
}

pub(crate) async fn register_component(
    custom_id: String,
    control: Arc<Guarded<ComponentEvent>>,
    expires_at: u64,
    now_unix: u64,
) {
    let mut table = components().lock().await;
    table.retain(|_, entry| entry.expires_at >= now_unix);
    table.insert(
        custom_id,
        ComponentEntry {
            control,
            expires_at,
        },
    );
}

pub(crate) async fn lookup_component(
    custom_id: &str,
    now_unix: u64,
) -> Option<Arc<Guarded<ComponentEvent>>> {
    let mut table = components().lock().await;
    match table.get(custom_id) {
        Some(entry) if entry.expires_at >= now_unix => Some(Arc::clone(&entry.control)),
        Some(_) => {
            table.remove(custom_id);
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use twilight_model::channel::message::component::{Button, ButtonStyle, Component};

    use super::*;
    use crate::embed::build_menu_embed;
    use crate::menu::MenuPage;

    fn sample_menu() -> Arc<ScrollPageMenu> {
        let embed = build_menu_embed("Title", "body").expect("embed builds");
        Arc::new(ScrollPageMenu::new(vec![MenuPage::new(embed)]).expect("menu builds"))
    }

    fn sample_control(custom_id: &str) -> Arc<Guarded<ComponentEvent>> {
        let control = Component::Button(Button {
            id: None,
            custom_id: Some(custom_id.to_owned()),
            disabled: false,
            emoji: None,
            label: Some("Press".to_owned()),
            style: ButtonStyle::Secondary,
            url: None,
            sku_id: None,
        });
        Arc::new(Guarded::new(control, |_event: ComponentEvent| async {
            Ok(())
        }))
    }

    #[tokio::test]
    async fn live_menus_resolve_and_expired_menus_vanish() {
        let menu_id = next_menu_id();
        register_menu(menu_id, sample_menu(), 100, 0).await;

        assert!(lookup_menu(menu_id, 50).await.is_some());
        assert!(lookup_menu(menu_id, 101).await.is_none());
        // The expired hit evicted the entry.
        assert!(lookup_menu(menu_id, 50).await.is_none());
    }

    #[tokio::test]
    async fn touching_a_menu_extends_its_registration() {
        let menu_id = next_menu_id();
        register_menu(menu_id, sample_menu(), 100, 0).await;

        touch_menu(menu_id, 300).await;

        assert!(lookup_menu(menu_id, 200).await.is_some());
    }

    #[tokio::test]
    async fn component_lookup_respects_expiry() {
        let custom_id = format!("reg-test:{}", next_menu_id());
        register_component(custom_id.clone(), sample_control(&custom_id), 100, 0).await;

        assert!(lookup_component(&custom_id, 99).await.is_some());
        assert!(lookup_component(&custom_id, 150).await.is_none());
        assert!(lookup_component(&custom_id, 99).await.is_none());
    }
}
