//! Routing of gateway reactions and messages into interactive sessions.
//!
//! The gateway loop feeds every `ReactionAdd` and `MessageCreate` event in
//! here. Reactions are delivered to the callback registered for the reacted
//! message; messages resolve the oldest pending `next_message` waiter whose
//! predicate matches.

use std::{
    collections::HashMap,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;
use twilight_model::{
    channel::{Message, message::EmojiReactionType},
    gateway::GatewayReaction,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};

/// A reaction added to a message, reduced to what sessions care about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub user_id: Id<UserMarker>,
    pub emoji: EmojiReactionType,
}

impl From<&GatewayReaction> for ReactionEvent {
    fn from(reaction: &GatewayReaction) -> Self {
        Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            guild_id: reaction.guild_id,
            user_id: reaction.user_id,
            emoji: reaction.emoji.clone(),
        }
    }
}

/// A newly created message, reduced to what message waiters inspect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub author_id: Id<UserMarker>,
    pub author_is_bot: bool,
    pub content: String,
}

impl From<&Message> for IncomingMessage {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            channel_id: message.channel_id,
            guild_id: message.guild_id,
            author_id: message.author.id,
            author_is_bot: message.author.bot,
            content: message.content.clone(),
        }
    }
}

/// Which users may drive a reaction callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionCriterion {
    /// Every non-bot user.
    Any,
    /// Only the given user.
    FromUser(Id<UserMarker>),
}

impl ReactionCriterion {
    /// Whether the reaction passes this criterion.
    pub fn accepts(&self, reaction: &ReactionEvent) -> bool {
        match self {
            Self::Any => true,
            Self::FromUser(user_id) => reaction.user_id == *user_id,
        }
    }
}

/// A session that reacts to reactions on one message.
#[async_trait]
pub trait ReactionCallback: Send + Sync {
    /// Filter applied before `handle_reaction` is called.
    fn criterion(&self) -> ReactionCriterion {
        ReactionCriterion::Any
    }

    /// Process one reaction. Returning `true` ends the session and removes
    /// the callback from the registry.
    async fn handle_reaction(&self, reaction: &ReactionEvent) -> bool;
}

type MessagePredicate = Box<dyn Fn(&IncomingMessage) -> bool + Send + Sync>;

struct MessageWaiter {
    id: u64,
    predicate: MessagePredicate,
    sender: oneshot::Sender<IncomingMessage>,
}

#[derive(Default)]
struct InteractiveState {
    current_user: OnceLock<Id<UserMarker>>,
    callbacks: Mutex<HashMap<Id<MessageMarker>, Arc<dyn ReactionCallback>>>,
    waiters: Mutex<Vec<MessageWaiter>>,
    next_waiter_id: AtomicU64,
}

/// Shared registry of reaction callbacks and pending message waiters.
#[derive(Clone, Default)]
pub struct Interactive {
    state: Arc<InteractiveState>,
}

impl Interactive {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the bot's own user so its reactions are never dispatched.
    pub fn set_current_user(&self, user_id: Id<UserMarker>) {
        let _ = self.state.current_user.set(user_id);
    }

    /// Route future reactions on `message_id` to `callback`.
    pub async fn add_reaction_callback(
        &self,
        message_id: Id<MessageMarker>,
        callback: Arc<dyn ReactionCallback>,
    ) {
        self.state
            .callbacks
            .lock()
            .await
            .insert(message_id, callback);
    }

    /// Stop routing reactions on `message_id`. Returns whether a callback was registered.
    pub async fn remove_reaction_callback(&self, message_id: Id<MessageMarker>) -> bool {
        self.state
            .callbacks
            .lock()
            .await
            .remove(&message_id)
            .is_some()
    }

    /// Whether a callback is registered for `message_id`.
    pub async fn has_reaction_callback(&self, message_id: Id<MessageMarker>) -> bool {
        self.state.callbacks.lock().await.contains_key(&message_id)
    }

    /// Deliver a reaction to its session.
    ///
    /// Returns `true` when a registered callback accepted the reaction.
    pub async fn handle_reaction(&self, reaction: ReactionEvent) -> bool {
        if self.state.current_user.get() == Some(&reaction.user_id) {
            return false;
        }

        let callback = self
            .state
            .callbacks
            .lock()
            .await
            .get(&reaction.message_id)
            .cloned();

        let Some(callback) = callback else {
            return false;
        };

        if !callback.criterion().accepts(&reaction) {
            debug!(
                message_id = reaction.message_id.get(),
                user_id = reaction.user_id.get(),
                "reaction rejected by session criterion"
            );
            return false;
        }

        if callback.handle_reaction(&reaction).await {
            self.remove_reaction_callback(reaction.message_id).await;
        }

        true
    }

    /// Wait for the next message matching `predicate`, up to `timeout`.
    pub async fn next_message<F>(&self, predicate: F, timeout: Duration) -> Option<IncomingMessage>
    where
        F: Fn(&IncomingMessage) -> bool + Send + Sync + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let id = self.state.next_waiter_id.fetch_add(1, Ordering::Relaxed);

        self.state.waiters.lock().await.push(MessageWaiter {
            id,
            predicate: Box::new(predicate),
            sender,
        });

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(message)) => Some(message),
            _ => {
                self.state
                    .waiters
                    .lock()
                    .await
                    .retain(|waiter| waiter.id != id);
                None
            }
        }
    }

    /// Offer a message to pending waiters.
    ///
    /// Returns `true` when a waiter consumed it. Command handling still runs
    /// for consumed messages.
    pub async fn handle_message(&self, message: &IncomingMessage) -> bool {
        let mut waiters = self.state.waiters.lock().await;
        waiters.retain(|waiter| !waiter.sender.is_closed());

        let Some(index) = waiters.iter().position(|waiter| (waiter.predicate)(message)) else {
            return false;
        };

        let waiter = waiters.remove(index);
        waiter.sender.send(message.clone()).is_ok()
    }

    /// Number of `next_message` calls still waiting.
    pub async fn pending_message_waiters(&self) -> usize {
        self.state
            .waiters
            .lock()
            .await
            .iter()
            .filter(|waiter| !waiter.sender.is_closed())
            .count()
    }
}
