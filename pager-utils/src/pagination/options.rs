//! Appearance options: which reactions drive a paginator and how it looks.

use std::time::Duration;

use twilight_model::{
    channel::message::EmojiReactionType,
    id::{Id, marker::EmojiMarker},
};

/// Default footer, `{page}` and `{pages}` are substituted on render.
pub const DEFAULT_FOOTER_FORMAT: &str = "Page {page}/{pages}";
/// Default number of embed fields shown per page.
pub const DEFAULT_FIELDS_PER_PAGE: usize = 6;
/// How long a user has to answer the jump prompt.
pub const DEFAULT_JUMP_TIMEOUT: Duration = Duration::from_secs(15);
/// How long the information reply stays up.
pub const DEFAULT_INFO_TIMEOUT: Duration = Duration::from_secs(30);

/// An emoji used as a paginator control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReactionSymbol {
    Unicode(String),
    Custom {
        id: Id<EmojiMarker>,
        name: Option<String>,
    },
}

impl ReactionSymbol {
    /// A unicode emoji control.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::Unicode(name.into())
    }

    /// Whether a reaction event carries this emoji. Custom emoji compare by id.
    pub fn matches(&self, emoji: &EmojiReactionType) -> bool {
        match (self, emoji) {
            (Self::Unicode(expected), EmojiReactionType::Unicode { name }) => expected == name,
            (Self::Custom { id: expected, .. }, EmojiReactionType::Custom { id, .. }) => {
                expected == id
            }
            _ => false,
        }
    }
}

impl From<&EmojiReactionType> for ReactionSymbol {
    fn from(emoji: &EmojiReactionType) -> Self {
        match emoji {
            EmojiReactionType::Unicode { name } => Self::Unicode(name.clone()),
            EmojiReactionType::Custom { id, name, .. } => Self::Custom {
                id: *id,
                name: name.clone(),
            },
        }
    }
}

/// What a recognized control does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerAction {
    First,
    Back,
    Next,
    Last,
    Jump,
    Stop,
    Info,
}

/// When the jump control is offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JumpDisplay {
    Always,
    Never,
    /// Only when the invoking user has `MANAGE_MESSAGES` in the channel's guild.
    #[default]
    WithManageMessages,
}

/// What pressing stop does to the paginated message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopAction {
    #[default]
    ClearReactions,
    DeleteMessage,
}

/// Controls, texts and timeouts of a paginator.
///
/// A `None` symbol disables that control entirely.
#[derive(Clone, Debug)]
pub struct AppearanceOptions {
    pub first: Option<ReactionSymbol>,
    pub back: Option<ReactionSymbol>,
    pub next: Option<ReactionSymbol>,
    pub last: Option<ReactionSymbol>,
    pub jump: Option<ReactionSymbol>,
    pub stop: Option<ReactionSymbol>,
    pub info: Option<ReactionSymbol>,
    pub footer_format: String,
    pub fields_per_page: usize,
    pub jump_display: JumpDisplay,
    pub jump_prompt: Option<String>,
    pub jump_timeout: Duration,
    pub timeout: Option<Duration>,
    pub display_info_icon: bool,
    pub information_text: String,
    pub info_timeout: Duration,
    pub stop_action: StopAction,
    /// Only the user who opened the paginator may drive it.
    pub source_user_only: bool,
}

impl Default for AppearanceOptions {
    fn default() -> Self {
        Self {
            first: Some(ReactionSymbol::unicode("⏮")),
            back: Some(ReactionSymbol::unicode("◀")),
            next: Some(ReactionSymbol::unicode("▶")),
            last: Some(ReactionSymbol::unicode("⏭")),
            jump: Some(ReactionSymbol::unicode("🔢")),
            stop: Some(ReactionSymbol::unicode("⏹")),
            info: Some(ReactionSymbol::unicode("ℹ")),
            footer_format: DEFAULT_FOOTER_FORMAT.to_owned(),
            fields_per_page: DEFAULT_FIELDS_PER_PAGE,
            jump_display: JumpDisplay::default(),
            jump_prompt: Some("**Enter a page number**".to_owned()),
            jump_timeout: DEFAULT_JUMP_TIMEOUT,
            timeout: None,
            display_info_icon: true,
            information_text:
                "This is a paginator. React with the respective icons to change page.".to_owned(),
            info_timeout: DEFAULT_INFO_TIMEOUT,
            stop_action: StopAction::default(),
            source_user_only: true,
        }
    }
}

impl AppearanceOptions {
    /// Map a reaction to the control it triggers.
    ///
    /// Controls are checked in a fixed order so a symbol reused for two
    /// controls resolves to the earlier one.
    pub fn action_for(&self, emoji: &EmojiReactionType) -> Option<PagerAction> {
        let controls = [
            (&self.first, PagerAction::First),
            (&self.next, PagerAction::Next),
            (&self.back, PagerAction::Back),
            (&self.last, PagerAction::Last),
            (&self.stop, PagerAction::Stop),
            (&self.jump, PagerAction::Jump),
            (&self.info, PagerAction::Info),
        ];

        controls.into_iter().find_map(|(symbol, action)| {
            symbol
                .as_ref()
                .is_some_and(|symbol| symbol.matches(emoji))
                .then_some(action)
        })
    }

    /// Controls to attach to a fresh paginator, in display order.
    pub fn reaction_order(&self, show_jump: bool) -> Vec<&ReactionSymbol> {
        let jump = self.jump.as_ref().filter(|_| show_jump);
        let info = self.info.as_ref().filter(|_| self.display_info_icon);

        [
            self.first.as_ref(),
            self.back.as_ref(),
            self.next.as_ref(),
            self.last.as_ref(),
            jump,
            self.stop.as_ref(),
            info,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Render the footer text for a page.
    pub fn footer_text(&self, page: usize, total_pages: usize) -> String {
        self.footer_format
            .replace("{page}", &page.to_string())
            .replace("{pages}", &total_pages.to_string())
    }
}
