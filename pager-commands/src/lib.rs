pub mod utility;

use std::sync::Arc;

use tracing::debug;
use twilight_model::gateway::payload::incoming::MessageCreate;

use pager_core::Context;
use pager_utils::COMMAND_PREFIX;
use pager_utils::pagination::{
    HttpPagerClient, PagerClient, PaginatedMessage, SourceContext, send_paginated_reply,
};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::pagetest::META,
    // Add new commands here
];

/// Split a prefixed command message into its lowercased name and first argument.
fn parse_command(content: &str) -> Option<(String, Option<&str>)> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut parts = content.split_whitespace();
    let cmd = parts.next()?.to_ascii_lowercase();
    Some((cmd, parts.next()))
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let Some((cmd, arg1)) = parse_command(&content_owned) else {
        return Ok(());
    };

    match cmd.as_str() {
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "pagetest" => utility::pagetest::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

/// Open a reaction paginator answering `msg`, using the configured inactivity timeout.
pub(crate) async fn open_paginator(
    ctx: &Context,
    msg: &MessageCreate,
    mut pager: PaginatedMessage,
) -> anyhow::Result<()> {
    pager.options.timeout = ctx.config.pager_timeout;

    let client: Arc<dyn PagerClient> = Arc::new(HttpPagerClient::new(Arc::clone(&ctx.http)));
    let source = SourceContext {
        channel_id: msg.channel_id,
        guild_id: msg.guild_id,
        user_id: msg.author.id,
    };

    let session = send_paginated_reply(client, ctx.interactive.clone(), source, pager).await?;
    debug!(
        channel_id = msg.channel_id.get(),
        user_id = msg.author.id.get(),
        pages = session.page_count(),
        "opened paginator"
    );

    Ok(())
}
