//! Session orchestration methods
//!
//! The primary tab's position is restored at startup and written back when
//! its path changes, plus once more on quit so Focus Memory is current.

use notefinder::logic;
use notefinder::repo::Repository;

use crate::App;

impl App {
    /// Rebuild the primary tab from the saved list state, or fall back to a
    /// plain root load
    pub(crate) fn restore_session(&mut self, repo: &dyn Repository) {
        let saved = match self.session.as_ref().map(|db| db.load_list_state(&self.app_name)) {
            Some(Ok(state)) => state,
            Some(Err(e)) => {
                tracing::warn!("Ignoring saved list state: {:#}", e);
                None
            }
            None => None,
        };

        let primary = self.model.tabs.primary().id();
        let Some(state) = saved else {
            self.load_root(primary);
            return;
        };

        match logic::session::restore_columns(repo, &state) {
            Ok(stack) => {
                tracing::info!("Restored {} column(s) from session", stack.columns.len());
                self.model.tabs.primary_mut().install_stack(stack.columns, stack.focus);
                self.last_saved = Some(self.model.tabs.primary().list_state());
            }
            Err(e) => {
                tracing::warn!("Session restore failed, loading root: {:#}", e);
                self.load_root(primary);
            }
        }
    }

    /// Save the primary tab's list state. Without `force` only a changed path
    /// is written.
    pub(crate) fn persist_session(&mut self, force: bool) {
        let Some(db) = self.session.as_ref() else {
            return;
        };
        let Some(state) = self.model.session_to_save(self.last_saved.as_ref(), force) else {
            return;
        };

        match db.save_list_state(&self.app_name, &state) {
            Ok(()) => {
                tracing::debug!("Saved list state: {:?}", state.path);
                self.last_saved = Some(state);
            }
            Err(e) => tracing::warn!("Failed to save list state: {:#}", e),
        }
    }
}
