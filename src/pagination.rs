use serde::Serialize;

/// Maximum number of numbered page buttons shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Which page controls to draw around the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub current: usize,
    pub total: usize,
    /// Contiguous run of page numbers rendered as direct links.
    pub pages: Vec<usize>,
    /// Separate "1" button, shown when the window starts after page 1.
    pub first_shortcut: bool,
    pub leading_ellipsis: bool,
    pub trailing_ellipsis: bool,
    /// Separate button for the last page, shown when the window ends early.
    pub last_shortcut: bool,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Compute the button window, centered on `current` where possible.
///
/// `current` is clamped into `1..=total` and `total` is at least 1.
pub fn page_window(current: usize, total: usize, max_visible: usize) -> PageWindow {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let width = max_visible.max(1);

    let start = if total > width {
        current
            .saturating_sub(width / 2)
            .clamp(1, total - width + 1)
    } else {
        1
    };
    let end = (start + width - 1).min(total);

    PageWindow {
        current,
        total,
        pages: (start..=end).collect(),
        first_shortcut: start > 1,
        leading_ellipsis: start > 2,
        trailing_ellipsis: end + 1 < total,
        last_shortcut: end < total,
        prev: (current > 1).then(|| current - 1),
        next: (current < total).then(|| current + 1),
    }
}
