use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use notefinder::model::ui::Overlay;
use notefinder::model::BrowseMode;

use crate::App;

/// Which key set the legend advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    Browse,
    Mark,
    Input,
    Confirm,
    Palette,
}

/// Everything the legend content depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendState {
    pub mode: LegendMode,
    pub has_cut: bool,
    pub has_open_command: bool,
}

impl LegendState {
    pub fn from_app(app: &App) -> Self {
        let mode = match (&app.model.ui.overlay, app.model.ui.mode) {
            (Overlay::Input(_), _) => LegendMode::Input,
            (Overlay::ConfirmDelete { .. }, _) => LegendMode::Confirm,
            (Overlay::JumpPalette(_), _) => LegendMode::Palette,
            (Overlay::None, BrowseMode::Mark) => LegendMode::Mark,
            (Overlay::None, BrowseMode::Normal) => LegendMode::Browse,
        };
        Self {
            mode,
            has_cut: app.model.clipboard.has_cut(),
            has_open_command: app.open_command.is_some(),
        }
    }
}

fn key(k: &'static str) -> Span<'static> {
    Span::styled(k, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(state: LegendState) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    match state.mode {
        LegendMode::Input => {
            hotkey_spans.extend(vec![
                key("Enter"),
                Span::raw(":Save  "),
                key("Esc"),
                Span::raw(":Cancel"),
            ]);
            return hotkey_spans;
        }
        LegendMode::Confirm => {
            hotkey_spans.extend(vec![key("y"), Span::raw(":Delete  "), key("n/Esc"), Span::raw(":Keep")]);
            return hotkey_spans;
        }
        LegendMode::Palette => {
            hotkey_spans.extend(vec![
                key("↑/↓"),
                Span::raw(":Select  "),
                key("Enter"),
                Span::raw(":Jump  "),
                key("* ?"),
                Span::raw(":Wildcards  "),
                key("Esc"),
                Span::raw(":Close"),
            ]);
            return hotkey_spans;
        }
        LegendMode::Browse | LegendMode::Mark => {}
    }

    hotkey_spans.extend(vec![
        key("↑/↓"),
        Span::raw(":Nav  "),
        key("Enter"),
        Span::raw(if state.has_open_command { ":Open  " } else { ":Enter  " }),
        key("→"),
        Span::raw(":Folder  "),
        key("←"),
        Span::raw(":Back  "),
        key("gg/G"),
        Span::raw(":First/Last  "),
        key("z"),
        Span::raw(":Jump  "),
        key("J/K"),
        Span::raw(":Preview  "),
    ]);

    if state.mode == LegendMode::Mark {
        hotkey_spans.extend(vec![
            key("v"),
            Span::raw(":End Marking  "),
            key("x"),
            Span::raw(":Cut Marked  "),
            key("Esc"),
            Span::raw(":Clear Marks  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("a/A"),
            Span::raw(":New Note/Folder  "),
            key("r"),
            Span::raw(":Rename  "),
            key("D"),
            Span::raw(":Delete  "),
            key("v"),
            Span::raw(":Mark  "),
            key("Space"),
            Span::raw(":Toggle  "),
            key("x"),
            Span::raw(":Cut  "),
        ]);

        // Paste only means something with a staged cut
        if state.has_cut {
            hotkey_spans.extend(vec![key("p"), Span::raw(":Paste  "), key("Esc"), Span::raw(":Drop Cut  ")]);
        }
    }

    hotkey_spans.extend(vec![
        key("t"),
        Span::raw(":New Tab  "),
        key("[/]"),
        Span::raw(":Tabs  "),
        key("^C"),
        Span::raw(":Close Tab  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(state: LegendState) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(state));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend (changes with mode and overlay)
pub fn render_legend(f: &mut Frame, area: Rect, state: LegendState) {
    f.render_widget(build_legend_paragraph(state), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, state: LegendState) -> u16 {
    // Build paragraph WITHOUT block borders for accurate line counting
    let hotkey_line = Line::from(build_hotkey_spans(state));
    let paragraph_for_counting = Paragraph::new(vec![hotkey_line]).wrap(ratatui::widgets::Wrap { trim: false });

    // Calculate available width (subtract left + right borders)
    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}
