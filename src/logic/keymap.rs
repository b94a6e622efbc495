//! Key bindings
//!
//! Translates browse-mode key events into [`Command`]s. Overlay keys (text
//! input, delete confirm, palette) are handled by the overlay itself and never
//! reach this table.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Window in which a second `g` completes the go-to-top gesture
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(500);

/// Everything the browser can be asked to do from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveDown,
    MoveUp,
    /// Enter the focused folder or open the focused note
    Descend,
    /// Enter the focused folder; does nothing on a note
    DescendFolder,
    Ascend,
    First,
    Last,
    OpenJump,
    PreviewDown,
    PreviewUp,
    CreateNote,
    CreateFolder,
    Rename,
    Delete,
    ToggleMarkMode,
    ToggleMark,
    Cut,
    Paste,
    NewTab,
    PrevTab,
    NextTab,
    CloseTab,
    Escape,
    Quit,
}

/// Stateful key table: remembers a pending `g` until it expires
#[derive(Debug, Clone, Default)]
pub struct KeyDispatcher {
    pending_g: Option<Instant>,
}

impl KeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a first `g` is waiting for its partner at `now`
    pub fn is_pending(&self, now: Instant) -> bool {
        self.pending_g
            .is_some_and(|at| now.saturating_duration_since(at) <= DOUBLE_TAP_WINDOW)
    }

    pub fn reset(&mut self) {
        self.pending_g = None;
    }

    pub fn dispatch(&mut self, key: &KeyEvent, now: Instant) -> Option<Command> {
        // Any key other than a plain 'g' breaks the sequence
        if key.code != KeyCode::Char('g') || !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            self.pending_g = None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Command::CloseTab),
                _ => None,
            };
        }

        let command = match key.code {
            KeyCode::Down | KeyCode::Char('j') => Command::MoveDown,
            KeyCode::Up | KeyCode::Char('k') => Command::MoveUp,
            KeyCode::Enter => Command::Descend,
            KeyCode::Right | KeyCode::Char('l') => Command::DescendFolder,
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => Command::Ascend,
            KeyCode::Home => Command::First,
            KeyCode::End | KeyCode::Char('G') => Command::Last,
            KeyCode::Char('g') => {
                if self.is_pending(now) {
                    self.pending_g = None;
                    Command::First
                } else {
                    // First 'g' - wait for second one
                    self.pending_g = Some(now);
                    return None;
                }
            }
            KeyCode::Char('z') => Command::OpenJump,
            KeyCode::Char('J') => Command::PreviewDown,
            KeyCode::Char('K') => Command::PreviewUp,
            KeyCode::Char('a') => Command::CreateNote,
            KeyCode::Char('A') => Command::CreateFolder,
            KeyCode::Char('r') => Command::Rename,
            KeyCode::Char('D') => Command::Delete,
            KeyCode::Char('v') => Command::ToggleMarkMode,
            KeyCode::Char(' ') => Command::ToggleMark,
            KeyCode::Char('x') => Command::Cut,
            KeyCode::Char('p') => Command::Paste,
            KeyCode::Char('t') => Command::NewTab,
            KeyCode::Char('[') => Command::PrevTab,
            KeyCode::Char(']') => Command::NextTab,
            KeyCode::Esc => Command::Escape,
            KeyCode::Char('q') => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shifted(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
    }

    #[test]
    fn test_basic_bindings() {
        let mut keys = KeyDispatcher::new();
        let now = Instant::now();
        assert_eq!(keys.dispatch(&key(KeyCode::Down), now), Some(Command::MoveDown));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('k')), now), Some(Command::MoveUp));
        assert_eq!(keys.dispatch(&key(KeyCode::Backspace), now), Some(Command::Ascend));
        assert_eq!(keys.dispatch(&key(KeyCode::Enter), now), Some(Command::Descend));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('z')), now), Some(Command::OpenJump));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('?')), now), None);
    }

    #[test]
    fn test_right_only_enters_folders() {
        let mut keys = KeyDispatcher::new();
        let now = Instant::now();
        assert_eq!(keys.dispatch(&key(KeyCode::Right), now), Some(Command::DescendFolder));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('l')), now), Some(Command::DescendFolder));
        assert_ne!(keys.dispatch(&key(KeyCode::Right), now), Some(Command::Descend));
    }

    #[test]
    fn test_case_sensitive_letters() {
        let mut keys = KeyDispatcher::new();
        let now = Instant::now();
        assert_eq!(keys.dispatch(&key(KeyCode::Char('a')), now), Some(Command::CreateNote));
        assert_eq!(keys.dispatch(&shifted('A'), now), Some(Command::CreateFolder));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('d')), now), None);
        assert_eq!(keys.dispatch(&shifted('D'), now), Some(Command::Delete));
        assert_eq!(keys.dispatch(&shifted('G'), now), Some(Command::Last));
    }

    #[test]
    fn test_ctrl_c_closes_tab() {
        let mut keys = KeyDispatcher::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.dispatch(&ctrl_c, Instant::now()), Some(Command::CloseTab));
    }

    #[test]
    fn test_double_g_within_window() {
        let mut keys = KeyDispatcher::new();
        let start = Instant::now();
        assert_eq!(keys.dispatch(&key(KeyCode::Char('g')), start), None);
        assert!(keys.is_pending(start));
        assert_eq!(
            keys.dispatch(&key(KeyCode::Char('g')), start + Duration::from_millis(300)),
            Some(Command::First)
        );
        assert!(!keys.is_pending(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_double_g_expires() {
        let mut keys = KeyDispatcher::new();
        let start = Instant::now();
        keys.dispatch(&key(KeyCode::Char('g')), start);
        // Too late: this 'g' starts a new sequence instead
        assert_eq!(keys.dispatch(&key(KeyCode::Char('g')), start + Duration::from_millis(800)), None);
        assert!(keys.is_pending(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_other_key_breaks_sequence() {
        let mut keys = KeyDispatcher::new();
        let now = Instant::now();
        keys.dispatch(&key(KeyCode::Char('g')), now);
        assert_eq!(keys.dispatch(&key(KeyCode::Char('j')), now), Some(Command::MoveDown));
        assert_eq!(keys.dispatch(&key(KeyCode::Char('g')), now), None);
    }
}
