//! Tab orchestration methods

use crate::App;

impl App {
    /// Open a tab after the active one and start its root load
    pub(crate) fn new_tab(&mut self) {
        let tab_id = self.model.tabs.open_tab();
        tracing::debug!("opened tab {}", tab_id);
        self.model.ui.preview_scroll = 0;
        self.load_root(tab_id);
    }

    pub(crate) fn next_tab(&mut self) {
        if self.model.tabs.next() {
            self.model.ui.preview_scroll = 0;
        }
    }

    pub(crate) fn prev_tab(&mut self) {
        if self.model.tabs.prev() {
            self.model.ui.preview_scroll = 0;
        }
    }

    /// Close the active tab. The last tab stays open.
    pub(crate) fn close_tab(&mut self) {
        match self.model.tabs.close_active() {
            Some(tab_id) => {
                tracing::debug!("closed tab {}", tab_id);
                self.model.ui.preview_scroll = 0;
            }
            None => self.model.show_toast("Last tab can't be closed"),
        }
    }
}
