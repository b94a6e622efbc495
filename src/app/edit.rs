//! Edit orchestration methods
//!
//! Inline create and rename, and delete with confirmation. The repository
//! call goes out through the service; the result comes back in
//! `handlers::repo`, which reloads the affected folder of this tab.

use notefinder::model::ui::{InputPurpose, InputState, Overlay};
use notefinder::repo::ItemKind;
use notefinder::services::RepoRequest;

use crate::App;

impl App {
    /// Open the inline title input for a new note or folder in the active column
    pub(crate) fn begin_create(&mut self, kind: ItemKind) {
        let Some(column) = self.model.tabs.active().active_column() else {
            return;
        };
        let parent_id = column.folder_id.clone();
        self.model.ui.overlay = Overlay::Input(InputState::create(kind, parent_id));
    }

    pub(crate) fn begin_rename(&mut self) {
        let Some(item) = self.model.tabs.active().focused_item() else {
            return;
        };
        self.model.ui.overlay = Overlay::Input(InputState::rename(item));
    }

    pub(crate) fn begin_delete(&mut self) {
        let Some(item) = self.model.tabs.active().focused_item().cloned() else {
            return;
        };
        self.model.ui.overlay = Overlay::ConfirmDelete { item };
    }

    /// Commit the inline input. A blank title cancels.
    pub(crate) fn commit_input(&mut self) {
        let Overlay::Input(input) = std::mem::take(&mut self.model.ui.overlay) else {
            return;
        };
        let Some(title) = input.committed_title() else {
            tracing::debug!("input cancelled: blank title");
            return;
        };
        let tab_id = self.model.tabs.active().id();

        match input.purpose {
            InputPurpose::Create { kind, parent_id } => {
                self.send(RepoRequest::Create {
                    tab_id,
                    kind,
                    title,
                    parent_id,
                });
            }
            InputPurpose::Rename { item } => {
                if item.title == title {
                    return;
                }
                self.send(RepoRequest::Rename { tab_id, item, title });
            }
        }
    }

    pub(crate) fn confirm_delete(&mut self) {
        let Overlay::ConfirmDelete { item } = std::mem::take(&mut self.model.ui.overlay) else {
            return;
        };
        let tab_id = self.model.tabs.active().id();
        self.send(RepoRequest::Delete { tab_id, item });
    }
}
