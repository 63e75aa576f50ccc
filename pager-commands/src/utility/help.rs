use twilight_model::{
    channel::message::embed::EmbedField, gateway::payload::incoming::MessageCreate,
};

use crate::{COMMANDS, CommandMeta, open_paginator};
use pager_core::Context;
use pager_utils::pagination::{AppearanceOptions, PageSet, PaginatedMessage};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 5;

/// Render the command catalog as a reaction paginator, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category.as_deref()
        && !categories.contains(&wanted_category)
    {
        let out = format!(
            "Unknown category `{}`. Available categories: {}.",
            wanted_category,
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    if commands.is_empty() {
        http.create_message(msg.channel_id)
            .content("No commands are registered.")
            .await?;
        return Ok(());
    }

    let pager = help_pager(&commands, category.as_deref());
    open_paginator(&ctx, &msg, pager).await
}

fn help_pager(commands: &[&CommandMeta], category: Option<&str>) -> PaginatedMessage {
    let fields = commands.iter().copied().map(command_field).collect();
    let description = match category {
        Some(category) => format!("Commands in `{category}`."),
        None => "Every command this bot understands.".to_owned(),
    };

    PaginatedMessage::new(PageSet::Fields(fields))
        .title("Available Commands")
        .alternate_description(description)
        .options(AppearanceOptions {
            fields_per_page: HELP_COMMANDS_PER_PAGE,
            ..AppearanceOptions::default()
        })
}

fn command_field(command: &CommandMeta) -> EmbedField {
    EmbedField {
        inline: false,
        name: format!("`{}` ({})", command.usage, command.category),
        value: command.desc.to_owned(),
    }
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pager_utils::pagination::build_page;

    #[test]
    fn commands_sort_by_category_then_name() {
        let names: Vec<&str> = sorted_commands(None)
            .iter()
            .map(|command| command.name)
            .collect();
        assert_eq!(names, ["help", "pagetest"]);
        assert!(sorted_commands(Some("moderation")).is_empty());
    }

    #[test]
    fn help_pager_renders_usage_fields() {
        let commands = sorted_commands(Some("utility"));
        let pager = help_pager(&commands, Some("utility"));
        let embed = build_page(&pager, 1).unwrap();

        assert_eq!(embed.fields.len(), commands.len());
        assert_eq!(embed.fields[0].name, "`!help [category]` (utility)");
        assert_eq!(embed.description.as_deref(), Some("Commands in `utility`."));
    }
}
