use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use notefinder::model::ui::InputState;
use notefinder::repo::Item;

/// Center a box of the given size inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Render the inline title input (create or rename)
pub fn render_input_dialog(f: &mut Frame, input: &InputState) {
    let prompt_area = centered(f.area(), 50, 3);

    let cursor_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK);
    let input_line = Line::from(vec![Span::raw(input.buffer.as_str()), Span::styled("█", cursor_style)]);

    let prompt = Paragraph::new(input_line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} - Enter to save, Esc to cancel ", input.prompt()))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, item: &Item) {
    let (item_type, warning) = if item.is_folder() {
        ("folder", "Everything inside it is deleted too!")
    } else {
        ("note", "This action cannot be undone!")
    };

    let prompt_text = format!(
        "Delete {}?\n\n\
        {}\n\n\
        WARNING: {}\n\n\
        Continue? (y/n)",
        item_type, item.title, warning
    );

    let prompt_area = centered(f.area(), 50, 11);

    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 50, 3);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 3);
    }
}
