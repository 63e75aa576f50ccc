use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use pager_commands::handle_message;
use pager_core::interactive::{IncomingMessage, ReactionEvent};
use pager_core::{BotConfig, Context, Interactive};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    let token = config.token.clone();
    info!(pager_timeout = ?config.pager_timeout, "configuration loaded");

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let ctx = Context::new(Arc::clone(&http), Interactive::new(), config);

    // Reactions drive the paginators, message content answers jump prompts
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS;

    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Pager bot is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                ctx.interactive.set_current_user(ready.user.id);
                info!(user_id = ready.user.id.get(), "Pager bot is ready");
            }

            // Handlers run detached so a session waiting on a jump reply
            // never blocks the event that answers it.
            Event::ReactionAdd(reaction) => {
                let interactive = ctx.interactive.clone();
                tokio::spawn(async move {
                    interactive
                        .handle_reaction(ReactionEvent::from(&reaction.0))
                        .await;
                });
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    ctx.interactive
                        .handle_message(&IncomingMessage::from(&msg.0))
                        .await;

                    if let Err(source) = handle_message(ctx.clone(), msg).await {
                        error!(?source, "command handler failed");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
