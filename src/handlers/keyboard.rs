//! Keyboard Input Handler
//!
//! Overlays (inline input, delete confirm, jump palette) take every key while
//! open. Otherwise the key goes through the [`KeyDispatcher`] table and the
//! resulting command is run against the active tab.
//!
//! [`KeyDispatcher`]: notefinder::logic::keymap::KeyDispatcher

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use notefinder::logic::keymap::Command;
use notefinder::logic::navigation::{next_selection, prev_selection};
use notefinder::model::ui::{Overlay, PaletteState};
use notefinder::repo::ItemKind;

use crate::App;

/// Lines scrolled per `J`/`K`
const PREVIEW_SCROLL_STEP: i32 = 3;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.model.ui.suppresses_commands() {
        app.keys.reset();
        handle_overlay_key(app, key);
    } else if let Some(command) = app.keys.dispatch(&key, Instant::now()) {
        run_command(app, command);
    }

    app.invalidate_preview_request();
    Ok(())
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match app.model.ui.overlay {
        Overlay::None => {}

        Overlay::Input(_) => match key.code {
            KeyCode::Enter => app.commit_input(),
            KeyCode::Esc => app.model.ui.close_overlay(),
            KeyCode::Backspace => {
                if let Some(input) = app.model.ui.input_mut() {
                    input.buffer.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(input) = app.model.ui.input_mut() {
                    input.buffer.push(c);
                }
            }
            _ => {}
        },

        Overlay::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.model.ui.close_overlay(),
            // Ignore other keys while prompt is showing
            _ => {}
        },

        Overlay::JumpPalette(_) => match key.code {
            KeyCode::Enter => app.commit_jump(),
            KeyCode::Esc => app.model.ui.close_overlay(),
            _ => {
                if let Some(palette) = app.model.ui.palette_mut() {
                    handle_palette_key(palette, key.code, ctrl);
                }
            }
        },
    }
}

fn handle_palette_key(palette: &mut PaletteState, code: KeyCode, ctrl: bool) {
    match code {
        KeyCode::Down => palette.select_next(),
        KeyCode::Up => palette.select_prev(),
        KeyCode::Char('n') if ctrl => palette.select_next(),
        KeyCode::Char('p') if ctrl => palette.select_prev(),
        KeyCode::Backspace => palette.pop_char(),
        KeyCode::Char(c) if !ctrl => palette.push_char(c),
        _ => {}
    }
}

fn run_command(app: &mut App, command: Command) {
    match command {
        Command::MoveDown => app.move_focus(next_selection),
        Command::MoveUp => app.move_focus(prev_selection),
        Command::Descend => app.descend(),
        Command::DescendFolder => app.descend_folder(),
        Command::Ascend => app.ascend(),
        Command::First => app.focus_first(),
        Command::Last => app.focus_last(),
        Command::OpenJump => app.open_jump(),
        Command::PreviewDown => app.scroll_preview(PREVIEW_SCROLL_STEP),
        Command::PreviewUp => app.scroll_preview(-PREVIEW_SCROLL_STEP),
        Command::CreateNote => app.begin_create(ItemKind::Note),
        Command::CreateFolder => app.begin_create(ItemKind::Folder),
        Command::Rename => app.begin_rename(),
        Command::Delete => app.begin_delete(),
        Command::ToggleMarkMode => app.toggle_mark_mode(),
        Command::ToggleMark => app.toggle_mark(),
        Command::Cut => app.cut(),
        Command::Paste => app.paste(),
        Command::NewTab => app.new_tab(),
        Command::PrevTab => app.prev_tab(),
        Command::NextTab => app.next_tab(),
        Command::CloseTab => app.close_tab(),
        Command::Escape => app.escape(),
        Command::Quit => app.model.ui.should_quit = true,
    }
}
