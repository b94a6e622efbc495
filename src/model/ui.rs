//! UI Model
//!
//! Browse mode, overlays (inline input, delete confirm, jump palette), toast
//! and the quit flag.

use std::collections::HashMap;
use std::time::Instant;

use crate::logic::search::{search_index, SearchHit};
use crate::repo::{Item, ItemKind};

/// Maximum rows shown in the jump palette
pub const PALETTE_LIMIT: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrowseMode {
    #[default]
    Normal,
    /// Every focus move also marks the newly focused item
    Mark,
}

/// What an inline text input commits to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPurpose {
    Rename { item: Item },
    Create { kind: ItemKind, parent_id: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputState {
    pub purpose: InputPurpose,
    pub buffer: String,
}

impl InputState {
    pub fn rename(item: &Item) -> Self {
        Self {
            buffer: item.title.clone(),
            purpose: InputPurpose::Rename { item: item.clone() },
        }
    }

    pub fn create(kind: ItemKind, parent_id: Option<String>) -> Self {
        Self {
            purpose: InputPurpose::Create { kind, parent_id },
            buffer: String::new(),
        }
    }

    pub fn prompt(&self) -> &'static str {
        match &self.purpose {
            InputPurpose::Rename { .. } => "Rename",
            InputPurpose::Create {
                kind: ItemKind::Note, ..
            } => "New note",
            InputPurpose::Create {
                kind: ItemKind::Folder,
                ..
            } => "New folder",
        }
    }

    /// Trimmed title, `None` when blank
    pub fn committed_title(&self) -> Option<String> {
        let title = self.buffer.trim();
        (!title.is_empty()).then(|| title.to_string())
    }
}

/// Jump-to palette: query, the loaded index and the ranked hits
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaletteState {
    pub query: String,
    /// `None` while the index is still loading
    pub index: Option<Vec<Item>>,
    pub hits: Vec<SearchHit>,
    pub selected: usize,
}

impl PaletteState {
    pub fn is_loading(&self) -> bool {
        self.index.is_none()
    }

    pub fn set_index(&mut self, items: Vec<Item>) {
        self.index = Some(items);
        self.refresh();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn select_next(&mut self) {
        if let Some(next) = crate::logic::navigation::next_selection(Some(self.selected), self.hits.len()) {
            self.selected = next;
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(prev) = crate::logic::navigation::prev_selection(Some(self.selected), self.hits.len()) {
            self.selected = prev;
        }
    }

    pub fn selected_hit(&self) -> Option<&SearchHit> {
        self.hits.get(self.selected)
    }

    /// `id -> parent` map over the loaded index
    pub fn parent_index(&self) -> HashMap<String, Option<String>> {
        self.index
            .as_deref()
            .map(crate::logic::jump::parent_index)
            .unwrap_or_default()
    }

    fn refresh(&mut self) {
        self.hits = match &self.index {
            Some(items) => search_index(items, &self.query, PALETTE_LIMIT),
            None => Vec::new(),
        };
        self.selected = crate::logic::navigation::clamp_index(self.selected, self.hits.len());
    }
}

/// Overlays suppress every browse command until resolved
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Input(InputState),
    ConfirmDelete { item: Item },
    JumpPalette(PaletteState),
}

#[derive(Clone, Debug)]
pub struct UiModel {
    pub mode: BrowseMode,
    pub overlay: Overlay,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Scroll offset of the preview pane
    pub preview_scroll: u16,

    /// Duration of the last successful folder load, for the status bar
    pub last_load_ms: Option<u64>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            mode: BrowseMode::Normal,
            overlay: Overlay::None,
            toast_message: None,
            preview_scroll: 0,
            last_load_ms: None,
            should_quit: false,
        }
    }

    /// Guard condition: text input, palette, or a pending delete confirm
    pub fn suppresses_commands(&self) -> bool {
        !matches!(self.overlay, Overlay::None)
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn input_mut(&mut self) -> Option<&mut InputState> {
        match &mut self.overlay {
            Overlay::Input(input) => Some(input),
            _ => None,
        }
    }

    pub fn palette_mut(&mut self) -> Option<&mut PaletteState> {
        match &mut self.overlay {
            Overlay::JumpPalette(palette) => Some(palette),
            _ => None,
        }
    }

    pub fn is_mark_mode(&self) -> bool {
        self.mode == BrowseMode::Mark
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some((message.into(), Instant::now()));
    }

    /// Check if toast should be dismissed
    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    /// Dismiss toast message
    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}
