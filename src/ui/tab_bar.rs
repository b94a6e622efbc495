use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use notefinder::model::TabManager;
use notefinder::utils::truncate_to_width;

/// Widest a single tab label may get
const MAX_TAB_LABEL: usize = 20;

/// Build the tab strip spans (extracted for testability)
fn build_tab_spans(tabs: &TabManager) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (index, tab) in tabs.tabs().iter().enumerate() {
        let label = format!(" {}:{} ", index + 1, truncate_to_width(tab.title(), MAX_TAB_LABEL));
        let style = if index == tabs.active_index() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render the tab strip, each tab labelled by its active folder title
pub fn render_tab_bar(f: &mut Frame, area: Rect, tabs: &TabManager) {
    f.render_widget(Paragraph::new(Line::from(build_tab_spans(tabs))), area);
}
