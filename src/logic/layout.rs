//! Layout calculation logic
//!
//! Pure functions for the column track geometry.

/// Column geometry for a given viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackGeometry {
    /// Number of columns that fit the viewport
    pub visible_columns: usize,
    /// Width of one column in terminal cells
    pub col_width: u16,
}

/// Calculate how many columns fit and how wide each one is
///
/// `visible_columns = floor(viewport / min_column_width)`, clamped to
/// `1..=max_visible_columns`; `col_width = floor(viewport / visible_columns)`.
///
/// # Examples
/// ```
/// use notefinder::logic::layout::track_geometry;
///
/// let g = track_geometry(100, 24, 5);
/// assert_eq!(g.visible_columns, 4);
/// assert_eq!(g.col_width, 25);
///
/// // Narrower than one column still shows one
/// let g = track_geometry(10, 24, 5);
/// assert_eq!(g.visible_columns, 1);
/// assert_eq!(g.col_width, 10);
/// ```
pub fn track_geometry(viewport_width: u16, min_column_width: u16, max_visible_columns: usize) -> TrackGeometry {
    let min_width = min_column_width.max(1);
    let fit = (viewport_width / min_width) as usize;
    let visible_columns = fit.clamp(1, max_visible_columns.max(1));
    let col_width = viewport_width / visible_columns as u16;
    TrackGeometry {
        visible_columns,
        col_width,
    }
}

/// Horizontal offset that pins the column at `depth` in the rightmost slot
///
/// # Examples
/// ```
/// use notefinder::logic::layout::track_offset;
///
/// // 4 slots of 25 cells: root at depth 0 sits in the last slot
/// assert_eq!(track_offset(4, 25, 0), 75);
/// assert_eq!(track_offset(4, 25, 3), 0);
/// // Deeper than the viewport: earlier columns scroll off to the left
/// assert_eq!(track_offset(4, 25, 5), -50);
/// ```
pub fn track_offset(visible_columns: usize, col_width: u16, depth: usize) -> i32 {
    (visible_columns as i32 - 1 - depth as i32) * col_width as i32
}

/// The on-screen span of column `index` for a track at `offset`, clipped to
/// `0..viewport_width`. `None` when the column is entirely off screen.
pub fn column_span(offset: i32, col_width: u16, index: usize, viewport_width: u16) -> Option<(u16, u16)> {
    let start = offset + index as i32 * col_width as i32;
    let end = start + col_width as i32;
    let clipped_start = start.max(0);
    let clipped_end = end.min(viewport_width as i32);
    if clipped_end <= clipped_start {
        return None;
    }
    Some((clipped_start as u16, (clipped_end - clipped_start) as u16))
}

/// Width of the preview pane, or 0 when the terminal is too narrow to spare it
pub fn preview_width(total_width: u16, percent: u16, min_column_width: u16) -> u16 {
    let width = (total_width as u32 * percent.min(80) as u32 / 100) as u16;
    if total_width.saturating_sub(width) < min_column_width || width < min_column_width / 2 {
        0
    } else {
        width
    }
}
