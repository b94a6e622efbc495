//! Jump-to orchestration methods
//!
//! Opening the palette loads the flat index in the background; committing a
//! hit asks the service to rebuild the stack scoped at the active column.

use notefinder::model::ui::{Overlay, PaletteState};
use notefinder::services::RepoRequest;

use crate::App;

impl App {
    pub(crate) fn open_jump(&mut self) {
        if self.model.tabs.active().depth().is_none() {
            return;
        }
        self.model.ui.overlay = Overlay::JumpPalette(PaletteState::default());
        self.send(RepoRequest::LoadIndex);
    }

    /// Jump to the selected palette hit. Closes the palette either way.
    pub(crate) fn commit_jump(&mut self) {
        let Overlay::JumpPalette(palette) = std::mem::take(&mut self.model.ui.overlay) else {
            return;
        };
        let Some(hit) = palette.selected_hit() else {
            return;
        };
        let target_id = hit.item.id.clone();
        let index = palette.parent_index();

        let tab = self.model.tabs.active_mut();
        let Some(base) = tab.active_column().cloned() else {
            return;
        };
        let Some(ticket) = tab.begin_jump() else {
            tracing::debug!("jump ignored: navigation in flight");
            return;
        };
        self.send(RepoRequest::ResolveJump {
            ticket,
            base,
            index,
            target_id,
        });
    }
}
