//! Page content model and pure pagination math.

use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;

use crate::embed::build_page_embed;

/// One unit of paginated content plus its own interactive rows.
///
/// A page is constructed once and never mutated afterwards; rendering
/// produces a derived copy with navigation prepended.
#[derive(Debug, Clone)]
pub struct MenuPage {
    /// Pre-rendered embed content for this page.
    pub embed: Embed,
    /// Interactive rows belonging to this page, excluding navigation.
    pub rows: Vec<Component>,
}

impl MenuPage {
    /// Create a page from pre-rendered embed content with no extra rows.
    pub fn new(embed: Embed) -> Self {
        Self {
            embed,
            rows: Vec::new(),
        }
    }

    /// Create a page carrying its own interactive rows.
    pub fn with_rows(embed: Embed, rows: Vec<Component>) -> Self {
        Self { embed, rows }
    }
}

/// A rejected jump-to-page selection; the menu stays on its current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPageSelection {
    /// Page count the entry was checked against.
    pub page_count: usize,
}

/// Compute the number of pages needed for a flat item list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Return start/end indices of one page's window into a flat item list.
pub fn page_window(total_items: usize, per_page: usize, page_index: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let start = page_index.saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

/// Parse a jump-modal entry as a one-based page number.
///
/// Non-numeric input parses to 0, which can never satisfy the one-based
/// bounds check, so it is always rejected downstream. Intentional policy.
pub fn parse_jump_entry(raw: &str) -> usize {
    raw.trim().parse::<usize>().unwrap_or(0)
}

/// Resolve a jump entry against a menu's page count.
///
/// Returns the zero-based target index when the entry names an existing
/// page, otherwise [`InvalidPageSelection`] and no transition happens.
pub fn resolve_jump_entry(raw: &str, page_count: usize) -> Result<usize, InvalidPageSelection> {
    let entered = parse_jump_entry(raw);
    if entered < 1 || entered > page_count {
        return Err(InvalidPageSelection { page_count });
    }
    Ok(entered - 1)
}

/// Chunk a flat item list into bullet-list pages, one embed per page.
///
/// Each page gets a `Page i/N` footer. An empty item list yields no pages.
pub fn pages_from_items(
    title: &str,
    items: &[String],
    per_page: usize,
) -> anyhow::Result<Vec<MenuPage>> {
    let count = total_pages(items.len(), per_page);
    let mut pages = Vec::with_capacity(count);

    for page_index in 0..count {
        let (start, end) = page_window(items.len(), per_page, page_index);
        let description = format!("- {}", items[start..end].join("\n- "));
        let embed = build_page_embed(title, description, page_index, count)?;
        pages.push(MenuPage::new(embed));
    }

    Ok(pages)
}
