use twilight_model::{
    channel::message::embed::{Embed, EmbedField},
    gateway::payload::incoming::MessageCreate,
};
use twilight_util::builder::embed::{EmbedAuthorBuilder, EmbedBuilder};

use crate::{CommandMeta, open_paginator};
use pager_core::Context;
use pager_utils::embed::DEFAULT_EMBED_COLOR;
use pager_utils::pagination::{AppearanceOptions, JumpDisplay, PageSet, PaginatedMessage};
use pager_utils::parse::parse_choice;

pub const META: CommandMeta = CommandMeta {
    name: "pagetest",
    desc: "Open a sample reaction paginator.",
    category: "utility",
    usage: "!pagetest [fields|text|embeds]",
};

const MODES: [&str; 3] = ["fields", "text", "embeds"];
const SAMPLE_ITEMS: usize = 24;
const ITEMS_PER_PAGE: usize = 5;

/// Sample pagination command.
///
/// Inputs:
/// - optional page-set shape: `!pagetest [fields|text|embeds]`, default `fields`.
///
/// Error behavior:
/// - returns usage text on an unknown shape.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(mode) = parse_choice(arg1, &MODES, "fields") else {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let pager = sample_pager(mode, &msg.author.name);
    open_paginator(&ctx, &msg, pager).await
}

fn sample_pager(mode: &str, requested_by: &str) -> PaginatedMessage {
    let pages = match mode {
        "text" => PageSet::Text(
            (1..=SAMPLE_ITEMS)
                .collect::<Vec<_>>()
                .chunks(ITEMS_PER_PAGE)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|index| format!("- Sample pagination item #{index}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect(),
        ),
        "embeds" => PageSet::Embeds((1..=4).map(sample_chapter).collect()),
        _ => PageSet::Fields(
            (1..=SAMPLE_ITEMS)
                .map(|index| EmbedField {
                    inline: true,
                    name: format!("Item #{index}"),
                    value: format!("Sample value {index}"),
                })
                .collect(),
        ),
    };

    PaginatedMessage::new(pages)
        .title("Pagination Test")
        .author(EmbedAuthorBuilder::new(format!("Requested by {requested_by}")).build())
        .alternate_description("Sample fields, five per page.")
        .options(AppearanceOptions {
            fields_per_page: ITEMS_PER_PAGE,
            jump_display: JumpDisplay::Always,
            ..AppearanceOptions::default()
        })
}

fn sample_chapter(chapter: usize) -> Embed {
    EmbedBuilder::new()
        .title(format!("Chapter {chapter}"))
        .color(DEFAULT_EMBED_COLOR)
        .description(format!("A pre-built embed page, number {chapter}."))
        .build()
}
