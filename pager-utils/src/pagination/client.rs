//! The chat operations a paginator needs, and their twilight implementation.

use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::message::embed::Embed,
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

use crate::permissions::has_channel_permission;

use super::options::ReactionSymbol;

/// Identity of a message the paginator owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

/// Chat-client operations consumed by paginator sessions.
///
/// Every call is independently fallible; sessions treat all of them except
/// the initial send as best effort.
#[async_trait]
pub trait PagerClient: Send + Sync {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: Option<&str>,
        embed: Option<&Embed>,
    ) -> anyhow::Result<MessageHandle>;

    /// Replace the plain content of a message; `None` clears it.
    async fn edit_content(&self, message: MessageHandle, content: Option<&str>)
    -> anyhow::Result<()>;

    async fn edit_embed(&self, message: MessageHandle, embed: &Embed) -> anyhow::Result<()>;

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()>;

    async fn add_reaction(&self, message: MessageHandle, emoji: &ReactionSymbol)
    -> anyhow::Result<()>;

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &ReactionSymbol,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()>;

    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()>;

    /// Whether `user_id` holds `permission` in `channel_id`, overwrites included.
    ///
    /// Outside a guild there is nothing to moderate, so the answer is `false`.
    async fn user_has_permission(
        &self,
        guild_id: Option<Id<GuildMarker>>,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
        permission: Permissions,
    ) -> anyhow::Result<bool>;
}

/// `PagerClient` backed by the shared twilight HTTP client.
#[derive(Clone)]
pub struct HttpPagerClient {
    http: Arc<Client>,
}

impl HttpPagerClient {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

fn request_reaction(symbol: &ReactionSymbol) -> RequestReactionType<'_> {
    match symbol {
        ReactionSymbol::Unicode(name) => RequestReactionType::Unicode {
            name: name.as_str(),
        },
        ReactionSymbol::Custom { id, name } => RequestReactionType::Custom {
            id: *id,
            name: name.as_deref(),
        },
    }
}

#[async_trait]
impl PagerClient for HttpPagerClient {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: Option<&str>,
        embed: Option<&Embed>,
    ) -> anyhow::Result<MessageHandle> {
        let mut request = self.http.create_message(channel_id);

        if let Some(content) = content {
            request = request.content(content);
        }

        if let Some(embed) = embed {
            request = request.embeds(std::slice::from_ref(embed));
        }

        let message = request.await?.model().await?;

        Ok(MessageHandle {
            channel_id: message.channel_id,
            message_id: message.id,
        })
    }

    async fn edit_content(
        &self,
        message: MessageHandle,
        content: Option<&str>,
    ) -> anyhow::Result<()> {
        self.http
            .update_message(message.channel_id, message.message_id)
            .content(content)
            .await?;

        Ok(())
    }

    async fn edit_embed(&self, message: MessageHandle, embed: &Embed) -> anyhow::Result<()> {
        self.http
            .update_message(message.channel_id, message.message_id)
            .embeds(Some(std::slice::from_ref(embed)))
            .await?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.http
            .delete_message(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }

    async fn add_reaction(
        &self,
        message: MessageHandle,
        emoji: &ReactionSymbol,
    ) -> anyhow::Result<()> {
        self.http
            .create_reaction(
                message.channel_id,
                message.message_id,
                &request_reaction(emoji),
            )
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &ReactionSymbol,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        self.http
            .delete_reaction(
                message.channel_id,
                message.message_id,
                &request_reaction(emoji),
                user_id,
            )
            .await?;

        Ok(())
    }

    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.http
            .delete_all_reactions(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }

    async fn user_has_permission(
        &self,
        guild_id: Option<Id<GuildMarker>>,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
        permission: Permissions,
    ) -> anyhow::Result<bool> {
        let Some(guild_id) = guild_id else {
            return Ok(false);
        };

        has_channel_permission(&self.http, guild_id, channel_id, user_id, permission).await
    }
}
