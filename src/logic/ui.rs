//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::model::ui::BrowseMode;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Whether a toast shown `elapsed_ms` ago should be taken down
///
/// # Examples
/// ```
/// use notefinder::logic::ui::should_dismiss_toast;
///
/// assert!(!should_dismiss_toast(200));
/// assert!(should_dismiss_toast(1500));
/// ```
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Flip between normal browsing and mark mode
///
/// # Examples
/// ```
/// use notefinder::logic::ui::toggle_browse_mode;
/// use notefinder::model::ui::BrowseMode;
///
/// assert_eq!(toggle_browse_mode(BrowseMode::Normal), BrowseMode::Mark);
/// assert_eq!(toggle_browse_mode(BrowseMode::Mark), BrowseMode::Normal);
/// ```
pub fn toggle_browse_mode(current: BrowseMode) -> BrowseMode {
    match current {
        BrowseMode::Normal => BrowseMode::Mark,
        BrowseMode::Mark => BrowseMode::Normal,
    }
}

/// Apply a scroll delta to the preview pane, never past the last line
pub fn scroll_preview(offset: u16, delta: i32, line_count: usize) -> u16 {
    let max = line_count.saturating_sub(1).min(u16::MAX as usize) as i32;
    (offset as i32 + delta).clamp(0, max) as u16
}
