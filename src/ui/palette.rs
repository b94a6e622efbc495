//! Jump Palette UI
//!
//! Centered popup with the query input on top and the ranked hits below,
//! each hit showing its title and the folder path it lives in.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use notefinder::logic::search::is_wildcard_query;
use notefinder::model::ui::PaletteState;

/// Title for the input box
fn palette_title(palette: &PaletteState) -> String {
    if palette.is_loading() {
        " Jump to - loading index… ".to_string()
    } else if palette.query.is_empty() {
        " Jump to ".to_string()
    } else if is_wildcard_query(&palette.query) {
        format!(" Jump to ({} matches, wildcard) ", palette.hits.len())
    } else {
        format!(" Jump to ({} matches) ", palette.hits.len())
    }
}

fn build_hit_rows(palette: &PaletteState) -> Vec<ListItem<'_>> {
    palette
        .hits
        .iter()
        .map(|hit| {
            let icon = if hit.item.is_folder() { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(icon, Style::default().fg(Color::Blue)),
                Span::raw(hit.item.title.as_str()),
                Span::styled(format!("  {}", hit.location), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect()
}

/// Render the jump palette over the track
pub fn render_palette(f: &mut Frame, palette: &PaletteState) {
    let area = f.area();
    let width = (area.width * 3 / 4).max(20).min(area.width);
    let height = (area.height * 2 / 3).max(6).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 3,
        width,
        height,
    };

    f.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(popup);

    let cursor_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK);
    let input_line = Line::from(vec![
        Span::raw("> "),
        Span::raw(palette.query.as_str()),
        Span::styled("█", cursor_style),
    ]);
    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(palette_title(palette))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(input, chunks[0]);

    let results_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if palette.is_loading() || palette.hits.is_empty() {
        let hint = if palette.is_loading() {
            "Loading…"
        } else if palette.query.is_empty() {
            "Type to search notes and folders"
        } else {
            "No matches"
        };
        let empty = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))).block(results_block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let list = List::new(build_hit_rows(palette))
        .block(results_block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(palette.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}
