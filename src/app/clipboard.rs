//! Mark / cut / paste orchestration methods

use notefinder::model::{BrowseMode, EscapeOutcome};
use notefinder::services::RepoRequest;

use crate::App;

impl App {
    pub(crate) fn toggle_mark_mode(&mut self) {
        match self.model.toggle_mark_mode() {
            BrowseMode::Mark => tracing::debug!("mark mode on"),
            BrowseMode::Normal => tracing::debug!("mark mode off"),
        }
    }

    pub(crate) fn toggle_mark(&mut self) {
        self.model.toggle_mark_focused();
    }

    pub(crate) fn cut(&mut self) {
        let count = self.model.cut();
        if count > 0 {
            self.model.show_toast(format!("Cut {} item{}", count, if count == 1 { "" } else { "s" }));
        }
    }

    /// Move the staged items into the active column's folder
    pub(crate) fn paste(&mut self) {
        if let Some(plan) = self.model.begin_paste() {
            self.send(RepoRequest::Move { plan });
        }
    }

    /// Escape cascade; the last step quits
    pub(crate) fn escape(&mut self) {
        if self.model.escape() == EscapeOutcome::Close {
            self.model.ui.should_quit = true;
        }
    }
}
