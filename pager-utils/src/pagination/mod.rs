//! Reaction-driven pagination: page sets, rendering and live sessions.

mod client;
mod error;
#[cfg(test)]
mod fake;
mod message;
pub mod options;
pub mod page;
pub mod respond;
mod session;
mod view;

pub use client::{HttpPagerClient, MessageHandle, PagerClient};
pub use error::PagerError;
pub use message::{PageSet, PaginatedMessage};
pub use options::{AppearanceOptions, JumpDisplay, PagerAction, ReactionSymbol, StopAction};
pub use page::{clamp_page, jump_target, navigate, page_window, total_pages};
pub use respond::{reply_and_delete, send_paginated_reply};
pub use session::{PaginatorSession, SourceContext};
pub use view::build_page;
