//! Preview Pane UI
//!
//! Right-hand pane: the children of the focused folder, or a short summary
//! of the focused note.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use notefinder::model::Tab;
use notefinder::repo::Item;

fn preview_lines(tab: &Tab) -> Vec<Line<'static>> {
    let Some(focused) = tab.focused_item() else {
        return vec![Line::from(Span::styled("Nothing selected", Style::default().fg(Color::DarkGray)))];
    };

    if !focused.is_folder() {
        return note_summary(focused, tab.title());
    }

    match tab.preview() {
        Some(preview) if preview.folder_id == focused.id => {
            if preview.items.is_empty() {
                return vec![Line::from(Span::styled("(empty)", Style::default().fg(Color::DarkGray)))];
            }
            preview
                .items
                .iter()
                .map(|item| {
                    let icon = if item.is_folder() { "▸ " } else { "  " };
                    Line::from(vec![
                        Span::styled(icon, Style::default().fg(Color::Blue)),
                        Span::raw(item.title.clone()),
                    ])
                })
                .collect()
        }
        _ => vec![Line::from(Span::styled("Loading…", Style::default().fg(Color::DarkGray)))],
    }
}

fn note_summary(note: &Item, folder_title: &str) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Yellow);
    vec![
        Line::from(Span::styled(note.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![Span::styled("Type: ", label), Span::raw("note")]),
        Line::from(vec![Span::styled("Folder: ", label), Span::raw(folder_title.to_string())]),
        Line::from(vec![Span::styled("Id: ", label), Span::raw(note.id.clone())]),
    ]
}

/// Render the preview pane
pub fn render_preview(f: &mut Frame, area: Rect, tab: &Tab, scroll: u16) {
    let title = match tab.focused_item() {
        Some(item) if item.is_folder() => format!("Preview: {}", item.title),
        _ => "Preview".to_string(),
    };

    let paragraph = Paragraph::new(preview_lines(tab))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        )
        .scroll((scroll, 0));

    f.render_widget(paragraph, area);
}
