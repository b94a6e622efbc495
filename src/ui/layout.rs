use ratatui::layout::{Constraint, Direction, Layout, Rect};

use notefinder::logic;

use super::legend::{calculate_legend_height, LegendState};
use crate::App;

/// Height of the bordered status bar
const STATUS_HEIGHT: u16 = 3;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Tab strip (one line)
    pub tab_area: Rect,
    /// Viewport of the column track
    pub track_area: Rect,
    /// Preview pane to the right of the track (if there is room)
    pub preview_area: Option<Rect>,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, app: &App) -> LayoutInfo {
    let legend_height = calculate_legend_height(terminal_size.width, LegendState::from_app(app));
    split_screen(
        terminal_size,
        legend_height,
        app.preview_width_percent,
        app.min_column_width,
    )
}

/// Split the terminal into tab bar, content, legend and status bar; the
/// content row is divided between the track and the preview pane
pub fn split_screen(terminal_size: Rect, legend_height: u16, preview_percent: u16, min_column_width: u16) -> LayoutInfo {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Tab bar
            Constraint::Min(3),                // Track + preview
            Constraint::Length(legend_height), // Legend area (dynamic height, exact fit for wrapped content)
            Constraint::Length(STATUS_HEIGHT), // Status bar
        ])
        .split(terminal_size);

    let content_area = main_chunks[1];
    let preview_width = logic::layout::preview_width(content_area.width, preview_percent, min_column_width);

    let (track_area, preview_area) = if preview_width == 0 {
        (content_area, None)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(preview_width)])
            .split(content_area);
        (chunks[0], Some(chunks[1]))
    };

    LayoutInfo {
        tab_area: main_chunks[0],
        track_area,
        preview_area,
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}
