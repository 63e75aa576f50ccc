//! Pure pagination math: page counts, windows, navigation and jump targets.

use super::options::PagerAction;
use crate::parse::parse_integer;

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Apply a navigation action to the current page.
///
/// Returns the page to render, or `None` for Back on the first page, Next on
/// the last page and non-navigation actions. First and Last always re-render.
pub fn navigate(action: PagerAction, page: usize, total_pages: usize) -> Option<usize> {
    let total_pages = total_pages.max(1);
    let page = clamp_page(page, total_pages);

    match action {
        PagerAction::First => Some(1),
        PagerAction::Last => Some(total_pages),
        PagerAction::Next if page < total_pages => Some(page + 1),
        PagerAction::Back if page > 1 => Some(page - 1),
        _ => None,
    }
}

/// Resolve typed jump input into a page inside the inclusive `[1, total_pages]` range.
pub fn jump_target(raw: &str, total_pages: usize) -> Option<usize> {
    let value = parse_integer(raw)?;
    let page = usize::try_from(value).ok()?;
    (1..=total_pages).contains(&page).then_some(page)
}
