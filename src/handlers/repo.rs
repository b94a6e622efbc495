//! Repository Response Handler
//!
//! Processes responses from the background repository service and applies
//! them to the Model. Navigation responses settle their ticket; mutation
//! responses queue the folder reloads that make the change visible.

use notefinder::logic::errors::{toast_message, ErrorKind};
use notefinder::model::NavOutcome;
use notefinder::services::{ReloadScope, RepoRequest, RepoResponse};

use crate::App;

/// Handle repository responses from background worker
pub fn handle_repo_response(app: &mut App, response: RepoResponse) {
    match response {
        RepoResponse::ChildrenLoaded {
            ticket,
            items,
            elapsed_ms,
        } => {
            let failure = items
                .as_ref()
                .err()
                .map(|e| toast_message("Loading folder", e, ErrorKind::Fetch));

            // Tab may have been closed while the fetch was in flight
            let Some(tab) = app.model.tabs.get_mut(ticket.tab_id) else {
                tracing::debug!("dropping listing for closed tab {}", ticket.tab_id);
                return;
            };

            match tab.complete_fetch(&ticket, items) {
                NavOutcome::Applied => {
                    app.model.ui.last_load_ms = Some(elapsed_ms);
                    app.model.ui.preview_scroll = 0;
                }
                NavOutcome::Failed => {
                    if let Some(message) = failure {
                        app.model.show_toast(message);
                    }
                }
                NavOutcome::Stale => {
                    tracing::debug!("stale listing for tab {} seq {}", ticket.tab_id, ticket.seq);
                }
            }
        }

        RepoResponse::JumpResolved { ticket, plan } => {
            let failure = plan
                .as_ref()
                .err()
                .map(|e| toast_message("Jump", e, ErrorKind::Fetch));

            let Some(tab) = app.model.tabs.get_mut(ticket.tab_id) else {
                return;
            };

            match tab.complete_jump(&ticket, plan) {
                NavOutcome::Applied => app.model.ui.preview_scroll = 0,
                // Unresolvable paths abort silently; fetch errors are reported
                NavOutcome::Failed => {
                    if let Some(message) = failure {
                        app.model.show_toast(message);
                    }
                }
                NavOutcome::Stale => {}
            }
        }

        RepoResponse::FolderReloaded {
            folder_id,
            scope,
            focus_id,
            items,
        } => {
            let items = match items {
                Ok(items) => items,
                Err(e) => {
                    // Best effort: other reloads are unaffected
                    tracing::warn!("reload of {:?} failed: {:#}", folder_id, e);
                    app.model.show_toast(toast_message("Refreshing folder", &e, ErrorKind::Fetch));
                    return;
                }
            };

            let touched = app
                .model
                .apply_reload(folder_id.as_deref(), &scope, focus_id.as_deref(), &items);
            tracing::debug!("reload of {:?} ({:?}) touched tabs {:?}", folder_id, scope, touched);
        }

        RepoResponse::PreviewLoaded {
            tab_id,
            folder_id,
            items,
        } => match items {
            Ok(items) => {
                if let Some(tab) = app.model.tabs.get_mut(tab_id) {
                    if !tab.set_preview(&folder_id, items) {
                        tracing::trace!("preview for {} arrived after focus moved", folder_id);
                    }
                }
            }
            Err(e) => tracing::warn!("preview of {} failed: {:#}", folder_id, e),
        },

        RepoResponse::IndexLoaded { items } => match items {
            Ok(items) => {
                if let Some(palette) = app.model.ui.palette_mut() {
                    palette.set_index(items);
                }
            }
            Err(e) => {
                if app.model.ui.palette_mut().is_some() {
                    app.model.ui.close_overlay();
                }
                app.model.show_toast(toast_message("Loading index", &e, ErrorKind::Fetch));
            }
        },

        RepoResponse::Created {
            tab_id,
            parent_id,
            result,
        } => match result {
            Ok(item) => {
                tracing::info!("created {} {}", item.kind.as_str(), item.id);
                app.send(RepoRequest::ReloadFolder {
                    folder_id: parent_id,
                    scope: ReloadScope::Tab(tab_id),
                    focus_id: Some(item.id),
                });
            }
            Err(e) => app.model.show_toast(toast_message("Create", &e, ErrorKind::Mutation)),
        },

        RepoResponse::Renamed {
            tab_id,
            item,
            title,
            result,
        } => match result {
            Ok(()) => {
                // Column headers of the renamed folder, in every tab
                if item.is_folder() {
                    for tab in app.model.tabs.tabs_mut() {
                        tab.retitle_folder(&item.id, &title);
                    }
                }
                app.send(RepoRequest::ReloadFolder {
                    folder_id: item.parent_id.clone(),
                    scope: ReloadScope::Tab(tab_id),
                    focus_id: Some(item.id),
                });
            }
            Err(e) => app.model.show_toast(toast_message("Rename", &e, ErrorKind::Mutation)),
        },

        RepoResponse::Deleted { tab_id, item, result } => match result {
            Ok(()) => {
                tracing::info!("deleted {} {}", item.kind.as_str(), item.id);
                app.model.clipboard.marks.unmark(&item.id);
                if let Some(tab) = app.model.tabs.get_mut(tab_id) {
                    if item.is_folder() {
                        tab.discard_deleted_folder(&item.id);
                    }
                }
                app.send(RepoRequest::ReloadFolder {
                    folder_id: item.parent_id,
                    scope: ReloadScope::Tab(tab_id),
                    focus_id: None,
                });
            }
            Err(e) => app.model.show_toast(toast_message("Delete", &e, ErrorKind::Mutation)),
        },

        RepoResponse::Moved { plan, result } => {
            for request in app.model.apply_moved(plan, result) {
                app.send(request);
            }
        }
    }
}
