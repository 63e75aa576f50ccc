//! Page sets and the shared metadata rendered around them.

use twilight_model::channel::message::embed::{Embed, EmbedAuthor, EmbedField};

use crate::embed::DEFAULT_EMBED_COLOR;

use super::error::PagerError;
use super::options::AppearanceOptions;
use super::page::total_pages;

/// The content a paginator pages through.
#[derive(Clone, Debug)]
pub enum PageSet {
    /// Pre-built embeds, one per page. Only the footer is stamped in.
    Embeds(Vec<Embed>),
    /// Plain text pages rendered as the embed description.
    Text(Vec<String>),
    /// Embed fields batched `fields_per_page` per page.
    Fields(Vec<EmbedField>),
}

impl PageSet {
    /// Number of raw entries in the set.
    pub fn len(&self) -> usize {
        match self {
            Self::Embeds(pages) => pages.len(),
            Self::Text(pages) => pages.len(),
            Self::Fields(fields) => fields.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rendered pages, failing on sets that cannot render a page.
    pub fn page_count(&self, fields_per_page: usize) -> Result<usize, PagerError> {
        if self.is_empty() {
            return Err(PagerError::EmptyPages);
        }

        match self {
            Self::Fields(fields) => {
                if fields_per_page == 0 {
                    return Err(PagerError::ZeroFieldsPerPage);
                }
                Ok(total_pages(fields.len(), fields_per_page))
            }
            other => Ok(other.len()),
        }
    }
}

/// A page set plus everything needed to render and drive it.
#[derive(Clone, Debug)]
pub struct PaginatedMessage {
    pub pages: PageSet,
    /// Plain message content sent above the embed.
    pub content: Option<String>,
    pub title: Option<String>,
    pub author: Option<EmbedAuthor>,
    pub color: u32,
    /// Description shown above field pages.
    pub alternate_description: Option<String>,
    pub options: AppearanceOptions,
}

impl PaginatedMessage {
    /// Wrap a page set with default styling and options.
    pub fn new(pages: PageSet) -> Self {
        Self {
            pages,
            content: None,
            title: None,
            author: None,
            color: DEFAULT_EMBED_COLOR,
            alternate_description: None,
            options: AppearanceOptions::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: EmbedAuthor) -> Self {
        self.author = Some(author);
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn alternate_description(mut self, description: impl Into<String>) -> Self {
        self.alternate_description = Some(description.into());
        self
    }

    pub fn options(mut self, options: AppearanceOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of rendered pages for this message's options.
    pub fn page_count(&self) -> Result<usize, PagerError> {
        self.pages.page_count(self.options.fields_per_page)
    }
}
