//! Recording `PagerClient` used by paginator tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use twilight_model::{
    channel::message::embed::Embed,
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};

use super::client::{MessageHandle, PagerClient};
use super::options::ReactionSymbol;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Send {
        handle: MessageHandle,
        content: Option<String>,
        embed: Option<Embed>,
    },
    EditContent(MessageHandle, Option<String>),
    EditEmbed(MessageHandle, Embed),
    DeleteMessage(MessageHandle),
    AddReaction(ReactionSymbol),
    RemoveReaction(ReactionSymbol, Id<UserMarker>),
    ClearReactions(MessageHandle),
}

#[derive(Default)]
pub struct FakeClient {
    calls: Mutex<Vec<Call>>,
    next_message_id: AtomicU64,
    fail_sends: AtomicBool,
    manage_messages: AtomicBool,
    failing_reactions: Mutex<Vec<ReactionSymbol>>,
}

impl FakeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_message_id: AtomicU64::new(1_000),
            ..Self::default()
        })
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn grant_manage_messages(&self) {
        self.manage_messages.store(true, Ordering::SeqCst);
    }

    pub fn fail_reaction(&self, symbol: ReactionSymbol) {
        self.failing_reactions.lock().unwrap().push(symbol);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    /// Footers of embeds sent as new messages.
    pub fn sent_footers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send {
                    embed: Some(embed), ..
                } => embed.footer.map(|footer| footer.text),
                _ => None,
            })
            .collect()
    }

    /// Plain content of messages sent without an embed.
    pub fn sent_contents(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send {
                    content: Some(content),
                    embed: None,
                    ..
                } => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Footers of embeds written by in-place edits.
    pub fn edited_footers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::EditEmbed(_, embed) => embed.footer.map(|footer| footer.text),
                _ => None,
            })
            .collect()
    }

    pub fn added_reactions(&self) -> Vec<ReactionSymbol> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddReaction(symbol) => Some(symbol),
                _ => None,
            })
            .collect()
    }

    pub fn removed_reactions(&self) -> Vec<ReactionSymbol> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RemoveReaction(symbol, _) => Some(symbol),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PagerClient for FakeClient {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: Option<&str>,
        embed: Option<&Embed>,
    ) -> anyhow::Result<MessageHandle> {
        if self.fail_sends.load(Ordering::SeqCst) {
            anyhow::bail!("send rejected");
        }

        let handle = MessageHandle {
            channel_id,
            message_id: Id::new(self.next_message_id.fetch_add(1, Ordering::SeqCst)),
        };
        self.record(Call::Send {
            handle,
            content: content.map(ToOwned::to_owned),
            embed: embed.cloned(),
        });

        Ok(handle)
    }

    async fn edit_content(
        &self,
        message: MessageHandle,
        content: Option<&str>,
    ) -> anyhow::Result<()> {
        self.record(Call::EditContent(message, content.map(ToOwned::to_owned)));
        Ok(())
    }

    async fn edit_embed(&self, message: MessageHandle, embed: &Embed) -> anyhow::Result<()> {
        self.record(Call::EditEmbed(message, embed.clone()));
        Ok(())
    }

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.record(Call::DeleteMessage(message));
        Ok(())
    }

    async fn add_reaction(
        &self,
        _message: MessageHandle,
        emoji: &ReactionSymbol,
    ) -> anyhow::Result<()> {
        if self.failing_reactions.lock().unwrap().contains(emoji) {
            anyhow::bail!("reaction rejected");
        }

        self.record(Call::AddReaction(emoji.clone()));
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _message: MessageHandle,
        emoji: &ReactionSymbol,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        self.record(Call::RemoveReaction(emoji.clone(), user_id));
        Ok(())
    }

    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.record(Call::ClearReactions(message));
        Ok(())
    }

    async fn user_has_permission(
        &self,
        guild_id: Option<Id<GuildMarker>>,
        _channel_id: Id<ChannelMarker>,
        _user_id: Id<UserMarker>,
        permission: Permissions,
    ) -> anyhow::Result<bool> {
        Ok(guild_id.is_some()
            && permission == Permissions::MANAGE_MESSAGES
            && self.manage_messages.load(Ordering::SeqCst))
    }
}
