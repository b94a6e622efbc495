//! Column Track UI
//!
//! Draws every visible column of the active tab at its slot on the track.
//! The track offset comes from the animator, so during a slide columns are
//! drawn part-way and clipped at the viewport edges.

use std::collections::HashMap;

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use notefinder::logic::layout::column_span;
use notefinder::model::clipboard::{CutBuffer, MarkSet};
use notefinder::model::{Column, Tab};
use notefinder::repo::Item;
use notefinder::utils::truncate_to_width;

/// List scroll offsets per tab and folder, carried from frame to frame
pub type ListOffsets = HashMap<String, usize>;

fn offset_key(tab: &Tab, column: &Column) -> String {
    format!("{}:{}", tab.id(), column.key())
}

/// Row to highlight. While `hold_scroll` is set the list must not scroll, so
/// a focus outside the current window is left unselected for this frame.
fn visible_selection(focused: usize, offset: usize, viewport_height: usize, hold_scroll: bool) -> Option<usize> {
    if !hold_scroll || (focused >= offset && focused < offset + viewport_height) {
        Some(focused)
    } else {
        None
    }
}

/// Icon shown before an item title
fn item_icon(item: &Item) -> &'static str {
    if item.is_folder() {
        "▸ "
    } else {
        "  "
    }
}

/// Build a list row with mark/cut indicators and a title cut to the panel
fn build_list_item<'a>(
    item: &'a Item,
    panel_width: u16,
    marked: bool,
    cut: bool,
) -> ListItem<'a> {
    let mut line_spans = Vec::new();

    let marker = if marked { "● " } else { "  " };
    line_spans.push(Span::styled(marker, Style::default().fg(Color::Magenta)));
    line_spans.push(Span::styled(item_icon(item), Style::default().fg(Color::Blue)));

    // panel_width - borders(2) - highlight(2) - marker(2) - icon(2)
    let available_width = panel_width.saturating_sub(8) as usize;
    let title = truncate_to_width(&item.title, available_width);

    let title_style = if cut {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else if item.is_folder() {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };
    line_spans.push(Span::styled(title, title_style));

    ListItem::new(Line::from(line_spans))
}

/// Render a single column panel
pub fn render_column_panel(
    f: &mut Frame,
    area: Rect,
    column: &Column,
    is_focused: bool,
    marks: &MarkSet,
    cut: Option<&CutBuffer>,
    offset: &mut usize,
    hold_scroll: bool,
) {
    let panel_width = area.width;
    let title = truncate_to_width(&column.title, panel_width.saturating_sub(4) as usize);

    // Build list widget with conditional styling
    let border_color = if is_focused { Color::Cyan } else { Color::Blue };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if column.items.is_empty() {
        let empty = Paragraph::new(Span::styled("  (empty)", Style::default().fg(Color::DarkGray))).block(block);
        f.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = column
        .items
        .iter()
        .map(|item| {
            build_list_item(
                item,
                panel_width,
                marks.contains(&item.id),
                cut.is_some_and(|c| c.contains(&item.id)),
            )
        })
        .collect();

    // Ancestors keep their highlight without the arrow
    let list = List::new(list_items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(if is_focused { "> " } else { "  " });

    let viewport_height = area.height.saturating_sub(2) as usize; // Subtract borders
    let mut state = ListState::default().with_offset(*offset);
    state.select(visible_selection(column.focused_index, *offset, viewport_height, hold_scroll));
    f.render_stateful_widget(list, area, &mut state);
    *offset = state.offset();

    // Render scrollbar if list is longer than visible area
    let total_items = column.items.len();

    if total_items > viewport_height && is_focused {
        let mut scrollbar_state =
            ScrollbarState::new(total_items.saturating_sub(viewport_height)).position(state.offset());

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                horizontal: 0,
                vertical: 1,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Render the visible columns of `tab` on a track at `offset`. While the
/// track slides, lists keep their scroll position.
pub fn render_track(
    f: &mut Frame,
    area: Rect,
    tab: &Tab,
    offset: i32,
    col_width: u16,
    marks: &MarkSet,
    cut: Option<&CutBuffer>,
    list_offsets: &mut ListOffsets,
    sliding: bool,
) {
    let Some(depth) = tab.depth() else {
        let loading = Paragraph::new("Loading…")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(tab.label().to_string()));
        f.render_widget(loading, area);
        return;
    };

    for (index, column) in tab.visible_columns().iter().enumerate() {
        let Some((x, width)) = column_span(offset, col_width, index, area.width) else {
            continue; // Off-screen
        };
        // Too thin to draw a bordered panel
        if width < 3 {
            continue;
        }
        let column_area = Rect {
            x: area.x + x,
            y: area.y,
            width,
            height: area.height,
        };
        let list_offset = list_offsets.entry(offset_key(tab, column)).or_insert(0);
        render_column_panel(f, column_area, column, index == depth, marks, cut, list_offset, sliding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_follows_focus_when_settled() {
        assert_eq!(visible_selection(40, 0, 10, false), Some(40));
    }

    #[test]
    fn test_selection_held_while_sliding() {
        // Inside the window: highlight without scrolling
        assert_eq!(visible_selection(5, 0, 10, true), Some(5));
        // Outside: no selection, so the list keeps its offset
        assert_eq!(visible_selection(12, 0, 10, true), None);
        assert_eq!(visible_selection(2, 3, 10, true), None);
    }
}
