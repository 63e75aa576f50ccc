//! Page rendering, selected by page-set shape.

use twilight_model::channel::message::embed::{Embed, EmbedFooter};
use twilight_util::builder::embed::EmbedBuilder;

use crate::embed::build_footer;

use super::error::PagerError;
use super::message::{PageSet, PaginatedMessage};
use super::page::{clamp_page, page_window};

/// Render one page of a paginated message.
///
/// The page is clamped into `[1, page_count]` first, so any index is safe.
/// Output depends only on `message` and `page`.
pub fn build_page(message: &PaginatedMessage, page: usize) -> Result<Embed, PagerError> {
    let total = message.page_count()?;
    let page = clamp_page(page, total);
    let footer = build_footer(message.options.footer_text(page, total));

    match &message.pages {
        PageSet::Embeds(pages) => {
            let mut embed = pages[page - 1].clone();
            embed.footer = Some(footer);
            Ok(embed)
        }
        PageSet::Text(pages) => {
            let builder = base_builder(message, footer).description(pages[page - 1].clone());
            finish(builder, page)
        }
        PageSet::Fields(fields) => {
            let (start, end) = page_window(fields.len(), message.options.fields_per_page, page);
            let mut builder = base_builder(message, footer);

            if let Some(description) = &message.alternate_description {
                builder = builder.description(description.clone());
            }

            for field in &fields[start..end] {
                builder = builder.field(field.clone());
            }

            finish(builder, page)
        }
    }
}

fn base_builder(message: &PaginatedMessage, footer: EmbedFooter) -> EmbedBuilder {
    let mut builder = EmbedBuilder::new().color(message.color).footer(footer);

    if let Some(title) = &message.title {
        builder = builder.title(title.clone());
    }

    if let Some(author) = &message.author {
        builder = builder.author(author.clone());
    }

    builder
}

fn finish(builder: EmbedBuilder, page: usize) -> Result<Embed, PagerError> {
    builder
        .validate()
        .map(EmbedBuilder::build)
        .map_err(|source| PagerError::Render {
            page,
            reason: source.to_string(),
        })
}
