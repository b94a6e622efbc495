//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the browser.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **TabManager**: every open tab, each owning its own Column Stack
//! - **Clipboard**: marks and the staged cut
//! - **TrackAnimator**: horizontal offset of the column filmstrip
//! - **UiModel**: mode, overlays, toast
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state in tests
//! - No services: All I/O lives in the binary's App
//! - Pure accessors: Helper methods are side-effect free

pub mod clipboard;
pub mod tab;
pub mod tabs;
pub mod track;
pub mod types;
pub mod ui;

pub use clipboard::{Clipboard, EscapeOutcome};
pub use tab::{Activation, JumpPlan, NavKind, NavOutcome, NavState, NavTicket, Tab};
pub use tabs::TabManager;
pub use track::{TrackAnimator, Transition};
pub use types::*;
pub use ui::{BrowseMode, UiModel};

use crate::logic::errors::{toast_message, ErrorKind};
use crate::logic::paste::{plan_paste, MoveCall, PastePlan};
use crate::repo::Item;
use crate::services::{ReloadScope, RepoRequest};
use crate::session::ListState;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub tabs: TabManager,
    pub clipboard: Clipboard,
    pub track: TrackAnimator,
    pub ui: UiModel,
}

impl Model {
    pub fn new(track: TrackAnimator) -> Self {
        Self {
            tabs: TabManager::new(),
            clipboard: Clipboard::new(),
            track,
            ui: UiModel::new(),
        }
    }

    /// Move focus in the active tab; in mark mode the newly focused item is
    /// marked too
    pub fn move_focus_with<F>(&mut self, update_fn: F) -> bool
    where
        F: Fn(Option<usize>, usize) -> Option<usize>,
    {
        let moved = self.tabs.active_mut().move_focus_with(update_fn);
        if moved && self.ui.is_mark_mode() {
            self.mark_focused();
        }
        moved
    }

    /// Enter or leave mark mode. Entering marks the focused item, leaving
    /// clears every mark.
    pub fn toggle_mark_mode(&mut self) -> BrowseMode {
        self.ui.mode = crate::logic::ui::toggle_browse_mode(self.ui.mode);
        match self.ui.mode {
            BrowseMode::Mark => self.mark_focused(),
            BrowseMode::Normal => self.clipboard.marks.clear(),
        }
        self.ui.mode
    }

    /// Mark/unmark the focused item. Returns whether it is marked afterwards.
    pub fn toggle_mark_focused(&mut self) -> bool {
        match self.tabs.active().focused_item().cloned() {
            Some(item) => self.clipboard.marks.toggle(&item),
            None => false,
        }
    }

    fn mark_focused(&mut self) {
        if let Some(item) = self.tabs.active().focused_item().cloned() {
            self.clipboard.marks.mark(&item);
        }
    }

    /// Stage marks (or the focused item) for a move. Leaves mark mode.
    pub fn cut(&mut self) -> usize {
        let tab = self.tabs.active();
        let focused = tab.focused_item().cloned();
        let folder = tab.active_column().and_then(|c| c.folder_id.clone());
        let count = self
            .clipboard
            .cut_marked_or_focused(focused.as_ref(), folder.as_deref());
        self.ui.mode = BrowseMode::Normal;
        count
    }

    /// Take the staged cut and plan its move into the active column's folder.
    /// The buffer is cleared either way; `None` when nothing would move.
    pub fn begin_paste(&mut self) -> Option<PastePlan> {
        let target = self.tabs.active().active_column()?.folder_id.clone();
        let buffer = self.clipboard.take_cut()?;
        let plan = plan_paste(&buffer, target.as_deref());
        if plan.call == MoveCall::None {
            tracing::debug!("paste: every staged item already lives in {:?}", target);
            return None;
        }
        Some(plan)
    }

    /// Settle a finished move. Success reloads every affected folder in every
    /// tab; a refused or failed move reloads nothing.
    pub fn apply_moved(&mut self, plan: PastePlan, result: anyhow::Result<bool>) -> Vec<RepoRequest> {
        match result {
            Ok(true) => {
                let mut folders: Vec<Option<String>> = plan.affected.into_iter().collect();
                folders.sort();
                folders
                    .into_iter()
                    .map(|folder_id| RepoRequest::ReloadFolder {
                        folder_id,
                        scope: ReloadScope::AllTabs,
                        focus_id: None,
                    })
                    .collect()
            }
            Ok(false) => {
                if plan.call != MoveCall::None {
                    self.show_toast("Error: Move refused");
                }
                Vec::new()
            }
            Err(e) => {
                self.show_toast(toast_message("Move", &e, ErrorKind::Mutation));
                Vec::new()
            }
        }
    }

    /// Push a reloaded listing into the tabs named by `scope`, focusing
    /// `focus_id` when its folder is the active column. Returns the tabs that
    /// changed.
    pub fn apply_reload(
        &mut self,
        folder_id: Option<&str>,
        scope: &ReloadScope,
        focus_id: Option<&str>,
        items: &[Item],
    ) -> Vec<TabId> {
        match scope {
            ReloadScope::Tab(tab_id) => {
                let Some(tab) = self.tabs.get_mut(*tab_id) else {
                    return Vec::new();
                };
                let touched = tab.apply_listing(folder_id, items);

                if let Some(id) = focus_id {
                    let index = tab
                        .active_column()
                        .filter(|c| c.shows_folder(folder_id))
                        .and_then(|c| c.index_of(id));
                    if let Some(index) = index {
                        tab.set_focused_index(index);
                    }
                }
                if touched {
                    vec![*tab_id]
                } else {
                    Vec::new()
                }
            }
            ReloadScope::AllTabs => self.tabs.apply_listing_everywhere(folder_id, items),
        }
    }

    /// The primary tab's list state when a write is due. Without `force` only
    /// a changed path counts; `force` also catches Focus Memory changes.
    pub fn session_to_save(&self, last_saved: Option<&ListState>, force: bool) -> Option<ListState> {
        let primary = self.tabs.primary();
        primary.depth()?;
        let state = primary.list_state();

        let unchanged = match last_saved {
            Some(last) if force => *last == state,
            Some(last) => last.path == state.path,
            None => false,
        };
        (!unchanged).then_some(state)
    }

    /// Escape cascade: leave mark mode / clear marks, then clear the cut,
    /// then ask to close
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.ui.is_mark_mode() {
            self.ui.mode = BrowseMode::Normal;
            self.clipboard.marks.clear();
            return EscapeOutcome::ClearedMarks;
        }
        self.clipboard.escape()
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.show_toast(message);
    }

    /// Dismiss toast message
    pub fn dismiss_toast(&mut self) {
        self.ui.dismiss_toast();
    }
}
