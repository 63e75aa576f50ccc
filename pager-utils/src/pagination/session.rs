//! The reaction paginator session.
//!
//! A session owns the current page of one paginated message. Reactions are
//! delivered by [`Interactive`]; page changes re-render the message in place
//! and push back the inactivity deadline. Stop and the inactivity timer both
//! end the session, whichever comes first.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::{
    sync::{Mutex, Notify, OnceCell},
    task::JoinHandle,
};
use tracing::{debug, info, warn};
use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, UserMarker},
    },
};

use pager_core::interactive::{
    Interactive, ReactionCallback, ReactionCriterion, ReactionEvent,
};

use crate::parse::parse_integer;

use super::client::{MessageHandle, PagerClient};
use super::error::PagerError;
use super::message::PaginatedMessage;
use super::options::{JumpDisplay, PagerAction, ReactionSymbol, StopAction};
use super::page::{jump_target, navigate};
use super::respond::reply_and_delete;
use super::view::build_page;

/// Where a paginator was opened and who opened it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceContext {
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub user_id: Id<UserMarker>,
}

#[derive(Debug)]
struct PagerState {
    page: usize,
}

/// A live reaction paginator bound to one message.
pub struct PaginatorSession {
    this: Weak<Self>,
    client: Arc<dyn PagerClient>,
    interactive: Interactive,
    source: SourceContext,
    pager: PaginatedMessage,
    pages: usize,
    handle: OnceCell<MessageHandle>,
    state: Mutex<PagerState>,
    jump_active: AtomicBool,
    jump_cancel: Notify,
    ended: AtomicBool,
    inactivity: Mutex<Option<JoinHandle<()>>>,
}

impl PaginatorSession {
    /// Create a session, validating that the page set can render at least one page.
    pub fn new(
        client: Arc<dyn PagerClient>,
        interactive: Interactive,
        source: SourceContext,
        pager: PaginatedMessage,
    ) -> Result<Arc<Self>, PagerError> {
        let pages = pager.page_count()?;

        Ok(Arc::new_cyclic(|this| Self {
            this: this.clone(),
            client,
            interactive,
            source,
            pager,
            pages,
            handle: OnceCell::new(),
            state: Mutex::new(PagerState { page: 1 }),
            jump_active: AtomicBool::new(false),
            jump_cancel: Notify::new(),
            ended: AtomicBool::new(false),
            inactivity: Mutex::new(None),
        }))
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub async fn current_page(&self) -> usize {
        self.state.lock().await.page
    }

    /// The paginated message, once displayed.
    pub fn message(&self) -> Option<MessageHandle> {
        self.handle.get().copied()
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_active.load(Ordering::SeqCst)
    }

    /// Send page 1 and start listening for reactions on it.
    ///
    /// Only the send itself can fail; controls are attached in the background.
    /// Concurrent and repeated calls share a single send.
    pub async fn display(&self) -> Result<MessageHandle, PagerError> {
        self.handle
            .get_or_try_init(|| self.send_first_page())
            .await
            .copied()
    }

    async fn send_first_page(&self) -> Result<MessageHandle, PagerError> {
        let embed = build_page(&self.pager, 1)?;
        let handle = self
            .client
            .send_message(
                self.source.channel_id,
                self.pager.content.as_deref(),
                Some(&embed),
            )
            .await
            .map_err(PagerError::Send)?;

        if let Some(session) = self.this.upgrade() {
            self.interactive
                .add_reaction_callback(handle.message_id, session)
                .await;
        }

        info!(
            message_id = handle.message_id.get(),
            pages = self.pages,
            "paginator displayed"
        );

        self.spawn_reaction_setup(handle);
        self.schedule_inactivity().await;

        Ok(handle)
    }

    /// Process one reaction. Returns `true` once the session has ended.
    pub async fn apply_reaction(&self, reaction: &ReactionEvent) -> bool {
        if self.is_ended() {
            return true;
        }

        let Some(handle) = self.message() else {
            return false;
        };

        let Some(action) = self.pager.options.action_for(&reaction.emoji) else {
            return false;
        };

        match action {
            PagerAction::Stop => self.stop(handle).await,
            PagerAction::Jump => {
                self.begin_jump(handle, reaction.user_id);
                self.strip_reaction(handle, reaction).await;
                false
            }
            PagerAction::Info => {
                self.strip_reaction(handle, reaction).await;
                self.notify(&self.pager.options.information_text).await;
                false
            }
            navigation => {
                let mut state = self.state.lock().await;
                self.strip_reaction(handle, reaction).await;

                if let Some(page) = navigate(navigation, state.page, self.pages) {
                    state.page = page;
                    self.render(handle, page).await;
                }

                false
            }
        }
    }

    fn spawn_reaction_setup(&self, handle: MessageHandle) {
        let client = Arc::clone(&self.client);
        let options = self.pager.options.clone();
        let origin = self.source;

        tokio::spawn(async move {
            let show_jump = match options.jump_display {
                JumpDisplay::Always => true,
                JumpDisplay::Never => false,
                JumpDisplay::WithManageMessages => client
                    .user_has_permission(
                        origin.guild_id,
                        origin.channel_id,
                        origin.user_id,
                        Permissions::MANAGE_MESSAGES,
                    )
                    .await
                    .unwrap_or_else(|source| {
                        debug!(?source, "permission lookup failed, hiding jump control");
                        false
                    }),
            };

            for symbol in options.reaction_order(show_jump) {
                if let Err(source) = client.add_reaction(handle, symbol).await {
                    debug!(
                        ?source,
                        message_id = handle.message_id.get(),
                        ?symbol,
                        "failed to add paginator reaction"
                    );
                }
            }
        });
    }

    async fn schedule_inactivity(&self) {
        let Some(timeout) = self.pager.options.timeout else {
            return;
        };
        let Some(session) = self.this.upgrade() else {
            return;
        };

        let mut slot = self.inactivity.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        if self.is_ended() {
            return;
        }

        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            session.expire().await;
        }));
    }

    async fn expire(&self) {
        let mut slot = self.inactivity.lock().await;
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        // The handle in the slot is this task; dropping it detaches.
        *slot = None;
        drop(slot);
        self.jump_cancel.notify_waiters();

        let Some(handle) = self.message() else {
            return;
        };

        self.interactive
            .remove_reaction_callback(handle.message_id)
            .await;
        info!(message_id = handle.message_id.get(), "paginator timed out");

        if let Err(source) = self.client.clear_reactions(handle).await {
            debug!(
                ?source,
                message_id = handle.message_id.get(),
                "failed to clear reactions after timeout"
            );
        }
    }

    async fn stop(&self, handle: MessageHandle) -> bool {
        if self.ended.swap(true, Ordering::SeqCst) {
            return true;
        }
        self.jump_cancel.notify_waiters();

        if let Some(timer) = self.inactivity.lock().await.take() {
            timer.abort();
        }

        let result = match self.pager.options.stop_action {
            StopAction::ClearReactions => self.client.clear_reactions(handle).await,
            StopAction::DeleteMessage => self.client.delete_message(handle).await,
        };

        if let Err(source) = result {
            debug!(
                ?source,
                message_id = handle.message_id.get(),
                "failed to clean up stopped paginator"
            );
        }

        info!(message_id = handle.message_id.get(), "paginator stopped");
        true
    }

    /// Edit the message to show `page`. The caller holds the state lock.
    async fn render(&self, handle: MessageHandle, page: usize) {
        self.schedule_inactivity().await;

        let embed = match build_page(&self.pager, page) {
            Ok(embed) => embed,
            Err(source) => {
                warn!(?source, page, "failed to render paginator page");
                return;
            }
        };

        if let Err(source) = self.client.edit_embed(handle, &embed).await {
            warn!(
                ?source,
                message_id = handle.message_id.get(),
                page,
                "failed to edit paginator message"
            );
        }
    }

    async fn strip_reaction(&self, handle: MessageHandle, reaction: &ReactionEvent) {
        let symbol = ReactionSymbol::from(&reaction.emoji);

        if let Err(source) = self
            .client
            .remove_reaction(handle, &symbol, reaction.user_id)
            .await
        {
            debug!(
                ?source,
                message_id = handle.message_id.get(),
                "failed to remove paginator reaction"
            );
        }
    }

    async fn notify(&self, content: &str) {
        if let Err(source) = reply_and_delete(
            &self.client,
            self.source.channel_id,
            content,
            self.pager.options.info_timeout,
        )
        .await
        {
            debug!(?source, "failed to send paginator notice");
        }
    }

    fn begin_jump(&self, handle: MessageHandle, user_id: Id<UserMarker>) {
        if self
            .jump_active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(
                message_id = handle.message_id.get(),
                "jump already in progress"
            );
            return;
        }

        let Some(session) = self.this.upgrade() else {
            self.jump_active.store(false, Ordering::SeqCst);
            return;
        };

        debug!(message_id = handle.message_id.get(), "jump started");
        tokio::spawn(async move {
            session.run_jump(handle, user_id).await;
        });
    }

    async fn run_jump(&self, handle: MessageHandle, user_id: Id<UserMarker>) {
        let options = &self.pager.options;

        let cancelled = self.jump_cancel.notified();
        tokio::pin!(cancelled);
        cancelled.as_mut().enable();

        if self.is_ended() {
            self.jump_active.store(false, Ordering::SeqCst);
            return;
        }

        if let Some(prompt) = options.jump_prompt.as_deref()
            && let Err(source) = self.client.edit_content(handle, Some(prompt)).await
        {
            debug!(?source, "failed to show jump prompt");
        }

        let channel_id = handle.channel_id;
        let next_reply = self.interactive.next_message(
            move |message| {
                message.channel_id == channel_id
                    && message.author_id == user_id
                    && parse_integer(&message.content).is_some()
            },
            options.jump_timeout,
        );

        let reply = tokio::select! {
            reply = next_reply => reply,
            () = &mut cancelled => None,
        };

        // Ended sessions leave both the message and the reply untouched.
        if self.is_ended() {
            debug!(message_id = handle.message_id.get(), "jump abandoned, session ended");
            self.jump_active.store(false, Ordering::SeqCst);
            return;
        }

        let target = match &reply {
            Some(reply) => {
                let target = jump_target(&reply.content, self.pages);
                if target.is_none() {
                    let notice = format!(
                        "Page {} does not exist. Available pages: 1-{}.",
                        reply.content.trim(),
                        self.pages
                    );
                    self.notify(&notice).await;
                }
                target
            }
            None => {
                debug!(message_id = handle.message_id.get(), "jump timed out");
                None
            }
        };

        if options.jump_prompt.is_some()
            && let Err(source) = self
                .client
                .edit_content(handle, self.pager.content.as_deref())
                .await
        {
            debug!(?source, "failed to clear jump prompt");
        }

        if let Some(reply) = reply {
            let reply_handle = MessageHandle {
                channel_id: reply.channel_id,
                message_id: reply.id,
            };
            if let Err(source) = self.client.delete_message(reply_handle).await {
                debug!(?source, "failed to delete jump reply");
            }
        }

        let mut state = self.state.lock().await;
        if !self.is_ended() {
            if let Some(page) = target {
                state.page = page;
            }
            self.render(handle, state.page).await;
        }
        self.jump_active.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReactionCallback for PaginatorSession {
    fn criterion(&self) -> ReactionCriterion {
        if self.pager.options.source_user_only {
            ReactionCriterion::FromUser(self.source.user_id)
        } else {
            ReactionCriterion::Any
        }
    }

    async fn handle_reaction(&self, reaction: &ReactionEvent) -> bool {
        self.apply_reaction(reaction).await
    }
}
