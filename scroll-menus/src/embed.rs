use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across menu views.
pub const MENU_EMBED_COLOR: u32 = 0x58_65_F2;

/// Build a standard menu embed with consistent styling.
pub fn build_menu_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .color(MENU_EMBED_COLOR)
        .description(description)
        .validate()?
        .build();

    Ok(embed)
}

/// Build a menu embed stamped with a `Page i/N` footer.
///
/// Single-page content gets no footer; `page_index` is zero-based.
pub fn build_page_embed(
    title: &str,
    description: impl Into<String>,
    page_index: usize,
    page_count: usize,
) -> anyhow::Result<Embed> {
    let builder = EmbedBuilder::new()
        .title(title)
        .color(MENU_EMBED_COLOR)
        .description(description);

    let embed = if page_count > 1 {
        let footer = EmbedFooterBuilder::new(format!("Page {}/{}", page_index + 1, page_count));
        builder.footer(footer.build()).validate()?.build()
    } else {
        builder.validate()?.build()
    };

    Ok(embed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embed_carries_one_based_footer() {
        let embed = build_page_embed("Title", "body", 1, 3).expect("embed builds");
        assert_eq!(embed.footer.expect("footer").text, "Page 2/3");
    }

    #[test]
    fn single_page_embed_has_no_footer() {
        let embed = build_page_embed("Title", "body", 0, 1).expect("embed builds");
        assert!(embed.footer.is_none());
        assert_eq!(embed.color, Some(MENU_EMBED_COLOR));
    }
}
