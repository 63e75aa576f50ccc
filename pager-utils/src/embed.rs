use twilight_model::channel::message::embed::EmbedFooter;
use twilight_util::builder::embed::EmbedFooterBuilder;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build an embed footer from already formatted text.
pub fn build_footer(text: impl Into<String>) -> EmbedFooter {
    EmbedFooterBuilder::new(text).build()
}
