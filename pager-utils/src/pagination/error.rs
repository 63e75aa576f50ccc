use thiserror::Error;

/// Failures a paginator reports to its caller.
///
/// Everything else (reaction cleanup, edits, reply deletion) is logged and
/// swallowed so a session stays usable.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("paginated message has no pages")]
    EmptyPages,
    #[error("fields per page must be at least 1")]
    ZeroFieldsPerPage,
    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },
    #[error("failed to send paginated message: {0:#}")]
    Send(anyhow::Error),
}
