//! Navigation orchestration methods
//!
//! Methods for moving through the column stack:
//! - Root loads and descends (fetched through the repository service)
//! - Ascend, focus moves, first/last
//! - Track geometry and slides before each frame
//! - Preview fetches once focus settles

use std::time::Instant;

use notefinder::logic;
use notefinder::model::{Activation, NavKind, NavTicket, TabId, Transition};
use notefinder::repo::Item;
use notefinder::services::RepoRequest;
use ratatui::layout::Rect;

use crate::{ui, App};

impl App {
    /// Start the root load of a tab
    pub(crate) fn load_root(&mut self, tab_id: TabId) {
        let Some(tab) = self.model.tabs.get_mut(tab_id) else {
            return;
        };
        if let Some(ticket) = tab.begin_load_root() {
            self.send(RepoRequest::LoadChildren {
                ticket,
                folder_id: None,
            });
        }
    }

    /// Move focus in the active column with an index update function
    pub(crate) fn move_focus<F>(&mut self, update_fn: F)
    where
        F: Fn(Option<usize>, usize) -> Option<usize>,
    {
        if self.model.move_focus_with(update_fn) {
            self.model.ui.preview_scroll = 0;
        }
    }

    pub(crate) fn focus_first(&mut self) {
        self.move_focus(|_, len| logic::navigation::first_selection(len));
    }

    pub(crate) fn focus_last(&mut self) {
        self.move_focus(|_, len| logic::navigation::last_selection(len));
    }

    /// Enter the focused folder, or open the focused note
    pub(crate) fn descend(&mut self) {
        match self.model.tabs.active_mut().activate() {
            Activation::Descend(ticket) => self.send_descend(ticket),
            Activation::OpenNote(item) => self.open_note(&item),
            Activation::Nothing => {
                if self.model.tabs.active().is_navigating() {
                    tracing::debug!("descend ignored: navigation in flight");
                }
            }
        }
    }

    /// Enter the focused folder; a focused note stays closed
    pub(crate) fn descend_folder(&mut self) {
        let Some(ticket) = self.model.tabs.active_mut().descend_focused_folder() else {
            return;
        };
        self.send_descend(ticket);
    }

    pub(crate) fn ascend(&mut self) {
        if self.model.tabs.active_mut().go_shallower() {
            self.model.ui.preview_scroll = 0;
        }
    }

    fn send_descend(&mut self, ticket: NavTicket) {
        let NavKind::Descend { folder, .. } = &ticket.kind else {
            return;
        };
        let folder_id = Some(folder.id.clone());
        tracing::debug!("descend into {:?} (tab {}, seq {})", folder_id, ticket.tab_id, ticket.seq);
        self.send(RepoRequest::LoadChildren { ticket, folder_id });
    }

    /// Run `open_command` with the note id and title
    pub(crate) fn open_note(&mut self, item: &Item) {
        let Some(ref open_cmd) = self.open_command else {
            self.model.show_toast(format!("Note: {}", item.title));
            return;
        };

        // Execute command in background (spawn, don't wait for completion)
        let result = std::process::Command::new(open_cmd)
            .arg(&item.id)
            .arg(&item.title)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn();

        match result {
            Ok(_child) => {
                tracing::debug!("open_command: spawned {} {}", open_cmd, item.id);
                self.model.show_toast(format!("Opened: {}", item.title));
            }
            Err(e) => {
                tracing::warn!("Failed to execute open_command '{}': {}", open_cmd, e);
                self.model.show_toast(format!("Error: Failed to open with '{}'", open_cmd));
            }
        }
    }

    pub(crate) fn scroll_preview(&mut self, delta: i32) {
        let lines = self
            .model
            .tabs
            .active()
            .preview()
            .map(|p| p.items.len())
            .unwrap_or(0);
        self.model.ui.preview_scroll = logic::ui::scroll_preview(self.model.ui.preview_scroll, delta, lines);
    }

    /// Recompute track geometry for this frame and start or snap a slide when
    /// the active depth changed
    pub(crate) fn prepare_frame(&mut self, area: Rect, now: Instant) {
        let layout = ui::layout::calculate_layout(area, self);
        self.model.track.resize(layout.track_area.width);

        let tab = self.model.tabs.active();
        if let Some(depth) = tab.depth() {
            let tab_id = tab.id();
            if let Transition::Animate { generation, duration } = self.model.track.sync(depth, tab_id, now) {
                let slide_tx = self.slide_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = slide_tx.send(generation);
                });
            }
        }
        self.model.track.sample(now);
    }

    /// Fetch the preview of the focused folder once focus has settled.
    /// Nothing is requested while the track slides.
    pub(crate) fn request_preview(&mut self) {
        if self.model.track.is_sliding() {
            return;
        }
        let tab = self.model.tabs.active();
        let Some(folder_id) = tab.preview_target().map(|item| item.id.clone()) else {
            self.preview_requested = None;
            return;
        };
        if tab.preview().is_some_and(|p| p.folder_id == folder_id) {
            return;
        }

        let key = (tab.id(), folder_id);
        if self.preview_requested.as_ref() == Some(&key) {
            return;
        }
        self.preview_requested = Some(key.clone());
        let (tab_id, folder_id) = key;
        self.send(RepoRequest::LoadPreview { tab_id, folder_id });
    }

    /// Allow a new preview request when the active tab lost its preview
    pub(crate) fn invalidate_preview_request(&mut self) {
        if self.model.tabs.active().preview().is_none() {
            self.preview_requested = None;
        }
    }
}
