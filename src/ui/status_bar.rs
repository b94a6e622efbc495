use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use notefinder::model::{BrowseMode, Model};

/// Build the status line: tab position, path, item count, marks, cut and
/// load time, separated by " | "
pub fn build_status_line(model: &Model) -> String {
    let tab = model.tabs.active();
    let mut metrics = Vec::new();

    metrics.push(format!("Tab: {}/{}", model.tabs.active_index() + 1, model.tabs.len()));

    let path: Vec<&str> = tab.visible_columns().iter().map(|c| c.title.as_str()).collect();
    if path.is_empty() {
        metrics.push("Path: (loading)".to_string());
    } else {
        metrics.push(format!("Path: {}", path.join(" / ")));
    }

    if let Some(column) = tab.active_column() {
        metrics.push(format!("{} items", column.items.len()));
    }

    if model.ui.mode == BrowseMode::Mark {
        metrics.push("MARK".to_string());
    }

    if !model.clipboard.marks.is_empty() {
        metrics.push(format!("Marked: {}", model.clipboard.marks.len()));
    }

    if let Some(cut) = model.clipboard.cut_buffer() {
        metrics.push(format!("Cut: {}", cut.items.len()));
    }

    if let Some(load_time) = model.ui.last_load_ms {
        metrics.push(format!("Load: {}ms", load_time));
    }

    metrics.join(" | ")
}

/// Split the status line and color the labels (before colons)
fn build_status_spans(status_line: &str) -> Vec<Span<'_>> {
    let mut spans = vec![];
    for (idx, part) in status_line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }

        if part == "MARK" {
            spans.push(Span::styled(part, Style::default().fg(Color::Magenta)));
        } else if let Some(colon_pos) = part.find(':') {
            let label = &part[..=colon_pos];
            let value = &part[colon_pos + 1..];
            spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(value));
        } else {
            spans.push(Span::raw(part));
        }
    }
    spans
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let status_line = build_status_line(model);

    let status_bar = Paragraph::new(Line::from(build_status_spans(&status_line)))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use notefinder::model::{Column, TrackAnimator};
    use notefinder::repo::{Item, ItemKind};
    use std::time::Duration;

    fn item(id: &str, kind: ItemKind) -> Item {
        Item {
            id: id.to_string(),
            kind,
            title: id.to_string(),
            parent_id: None,
        }
    }

    fn model() -> Model {
        Model::new(TrackAnimator::new(24, 3, Duration::from_millis(0), true))
    }

    #[test]
    fn test_loading_tab_has_placeholder_path() {
        let line = build_status_line(&model());
        assert!(line.starts_with("Tab: 1/1 | Path: (loading)"), "got: {}", line);
    }

    #[test]
    fn test_path_and_counts() {
        let mut model = model();
        let folder = item("Work", ItemKind::Folder);
        model.tabs.active_mut().install_stack(
            vec![
                Column::root(vec![folder.clone()], 0),
                Column::new(Some("Work".to_string()), "Work", vec![item("a", ItemKind::Note)], 0),
            ],
            Vec::new(),
        );
        model.clipboard.marks.mark(&item("a", ItemKind::Note));
        model.ui.last_load_ms = Some(12);

        let line = build_status_line(&model);
        assert!(line.contains("Path: Notes / Work"), "got: {}", line);
        assert!(line.contains("1 items"));
        assert!(line.contains("Marked: 1"));
        assert!(line.ends_with("Load: 12ms"));
    }

    #[test]
    fn test_labels_colored() {
        let spans = build_status_spans("Tab: 1/2 | MARK");
        assert_eq!(spans[0].content, "Tab:");
        assert_eq!(spans[0].style.fg, Some(Color::Yellow));
        assert_eq!(spans.last().map(|s| s.style.fg), Some(Some(Color::Magenta)));
    }
}
