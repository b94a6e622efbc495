//! Tab Model
//!
//! One independent Column Stack with its own Focus Memory, active depth,
//! in-flight navigation state and preview cache. Fields are private: every
//! mutation goes through the methods below so depth and columns always change
//! together.

use std::collections::HashMap;

use super::types::{folder_key, Column, Preview, TabId};
use crate::logic;
use crate::repo::Item;
use crate::session::ListState;

/// What an in-flight navigation will do once its fetch resolves
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavKind {
    /// Initial load of the root column
    Root,
    /// Enter `folder`, which sits in the column at `from_depth`
    Descend { from_depth: usize, folder: Item },
    /// Jump-to rebuild scoped at the column at `base_depth`
    Jump { base_depth: usize },
}

/// Token for one in-flight navigation of one tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTicket {
    pub tab_id: TabId,
    pub seq: u64,
    pub kind: NavKind,
}

/// Re-entrancy guard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Navigating(NavTicket),
}

/// Result of resolving a ticket
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The stack changed
    Applied,
    /// Fetch or resolution failed; the stack is untouched
    Failed,
    /// The ticket is not the one in flight; ignored
    Stale,
}

/// What activating the focused item asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    Descend(NavTicket),
    OpenNote(Item),
    Nothing,
}

/// Scoped stack produced by the jump resolver
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpPlan {
    /// Rebuilt columns, starting with the clone of the base column
    pub columns: Vec<Column>,
    /// Folder key → focused index for every touched column
    pub focus: Vec<(String, usize)>,
}

#[derive(Clone, Debug)]
pub struct Tab {
    id: TabId,
    label: String,
    columns: Vec<Column>,
    depth: Option<usize>,
    focus_memory: HashMap<String, usize>,
    preview: Option<Preview>,
    nav: NavState,
    next_seq: u64,
}

impl Tab {
    /// A tab in the pre-load state (no columns, no depth)
    pub fn new(id: TabId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            columns: Vec::new(),
            depth: None,
            focus_memory: HashMap::new(),
            preview: None,
            nav: NavState::Idle,
            next_seq: 0,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Title of the active column, or the tab label before the first load
    pub fn title(&self) -> &str {
        self.active_column()
            .map(|c| c.title.as_str())
            .unwrap_or(self.label.as_str())
    }

    /// The whole stack, including retained columns beyond `depth`
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// `columns[0..=depth]`
    pub fn visible_columns(&self) -> &[Column] {
        match self.depth {
            Some(depth) => &self.columns[..=depth],
            None => &[],
        }
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn active_column(&self) -> Option<&Column> {
        self.depth.and_then(|d| self.columns.get(d))
    }

    pub fn focused_item(&self) -> Option<&Item> {
        self.active_column().and_then(Column::focused_item)
    }

    pub fn remembered_focus(&self, folder_id: Option<&str>) -> Option<usize> {
        self.focus_memory.get(&folder_key(folder_id)).copied()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.nav, NavState::Navigating(_))
    }

    fn issue_ticket(&mut self, kind: NavKind) -> NavTicket {
        self.next_seq += 1;
        let ticket = NavTicket {
            tab_id: self.id,
            seq: self.next_seq,
            kind,
        };
        self.nav = NavState::Navigating(ticket.clone());
        ticket
    }

    /// Take the in-flight slot if `ticket` owns it
    fn settle(&mut self, ticket: &NavTicket) -> bool {
        match &self.nav {
            NavState::Navigating(current) if current.seq == ticket.seq => {
                self.nav = NavState::Idle;
                true
            }
            _ => false,
        }
    }

    // ============================================
    // ROOT LOAD / DESCEND
    // ============================================

    /// Start loading the root column. Only valid before the first load.
    pub fn begin_load_root(&mut self) -> Option<NavTicket> {
        if self.is_navigating() || self.depth.is_some() {
            return None;
        }
        Some(self.issue_ticket(NavKind::Root))
    }

    /// Start entering `item`. Returns `None` for notes, before the first load,
    /// or while another navigation is in flight.
    pub fn begin_go_deeper(&mut self, item: &Item) -> Option<NavTicket> {
        if !item.is_folder() || self.is_navigating() {
            return None;
        }
        let from_depth = self.depth?;
        Some(self.issue_ticket(NavKind::Descend {
            from_depth,
            folder: item.clone(),
        }))
    }

    /// Resolve a root or descend ticket with the fetched children
    pub fn complete_fetch(&mut self, ticket: &NavTicket, result: anyhow::Result<Vec<Item>>) -> NavOutcome {
        if !self.settle(ticket) {
            return NavOutcome::Stale;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    tab = self.id,
                    "navigation fetch failed: {}",
                    logic::errors::format_error_message(&e)
                );
                return NavOutcome::Failed;
            }
        };

        match &ticket.kind {
            NavKind::Root => {
                let focus = self.remembered_focus(None).unwrap_or(0);
                let column = Column::root(items, focus);
                self.focus_memory.insert(column.key(), column.focused_index);
                self.columns = vec![column];
                self.depth = Some(0);
                self.preview = None;
                NavOutcome::Applied
            }
            NavKind::Descend { from_depth, folder } => {
                let from_depth = *from_depth;
                if from_depth >= self.columns.len() {
                    return NavOutcome::Failed;
                }

                // Keep the parent's highlight on the entered folder even if focus
                // moved while the fetch was in flight
                if let Some(index) = self.columns[from_depth].index_of(&folder.id) {
                    let parent = &mut self.columns[from_depth];
                    parent.set_focus(index);
                    self.focus_memory.insert(parent.key(), index);
                }

                let remembered = self.remembered_focus(Some(&folder.id)).unwrap_or(0);
                let column = Column::new(Some(folder.id.clone()), folder.title.clone(), items, remembered);

                self.columns.truncate(from_depth + 1);
                self.focus_memory.insert(column.key(), column.focused_index);
                self.columns.push(column);
                self.depth = Some(from_depth + 1);
                self.preview = None;
                NavOutcome::Applied
            }
            NavKind::Jump { .. } => NavOutcome::Failed,
        }
    }

    /// Leave to the parent column. Columns are retained.
    pub fn go_shallower(&mut self) -> bool {
        match self.depth {
            Some(depth) if depth > 0 && !self.is_navigating() => {
                self.depth = Some(depth - 1);
                self.preview = None;
                true
            }
            _ => false,
        }
    }

    /// Jump to any depth already present in the stack (breadcrumb click)
    pub fn go_to_depth(&mut self, target: usize) -> bool {
        if self.is_navigating() || target >= self.columns.len() || self.depth == Some(target) {
            return false;
        }
        self.depth = Some(target);
        self.preview = None;
        true
    }

    // ============================================
    // FOCUS
    // ============================================

    /// Set focus in the active column and mirror it into Focus Memory
    pub fn set_focused_index(&mut self, index: usize) -> bool {
        match self.depth {
            Some(depth) => self.set_column_focus(depth, index),
            None => false,
        }
    }

    /// Set focus in any column of the stack; returns whether it changed
    pub fn set_column_focus(&mut self, column: usize, index: usize) -> bool {
        let Some(col) = self.columns.get_mut(column) else {
            return false;
        };
        let before = col.focused_index;
        let stored = col.set_focus(index);
        self.focus_memory.insert(col.key(), stored);
        if Some(column) == self.depth && before != stored {
            self.preview = None;
        }
        before != stored
    }

    /// Move focus in the active column with an index update function
    /// receiving (current, len)
    pub fn move_focus_with<F>(&mut self, update_fn: F) -> bool
    where
        F: Fn(Option<usize>, usize) -> Option<usize>,
    {
        let Some(column) = self.active_column() else {
            return false;
        };
        let len = column.items.len();
        if len == 0 {
            return false;
        }
        match update_fn(Some(column.focused_index), len) {
            Some(next) => self.set_focused_index(next),
            None => false,
        }
    }

    /// Enter the focused folder or ask to open the focused note
    pub fn activate(&mut self) -> Activation {
        let Some(item) = self.focused_item().cloned() else {
            return Activation::Nothing;
        };
        if item.is_folder() {
            match self.begin_go_deeper(&item) {
                Some(ticket) => Activation::Descend(ticket),
                None => Activation::Nothing,
            }
        } else {
            Activation::OpenNote(item)
        }
    }

    /// Enter the focused item when it is a folder. Notes are left alone.
    pub fn descend_focused_folder(&mut self) -> Option<NavTicket> {
        let item = self.focused_item().filter(|item| item.is_folder()).cloned()?;
        self.begin_go_deeper(&item)
    }

    // ============================================
    // JUMP / RESTORE
    // ============================================

    /// Start a jump-to rebuild scoped at the active column
    pub fn begin_jump(&mut self) -> Option<NavTicket> {
        if self.is_navigating() {
            return None;
        }
        let base_depth = self.depth?;
        Some(self.issue_ticket(NavKind::Jump { base_depth }))
    }

    /// Commit a jump plan: the stack becomes `columns[..base_depth] ++ plan`
    pub fn complete_jump(
        &mut self,
        ticket: &NavTicket,
        result: anyhow::Result<Option<JumpPlan>>,
    ) -> NavOutcome {
        if !self.settle(ticket) {
            return NavOutcome::Stale;
        }
        let NavKind::Jump { base_depth } = &ticket.kind else {
            return NavOutcome::Failed;
        };
        let base_depth = *base_depth;
        let plan = match result {
            Ok(Some(plan)) if !plan.columns.is_empty() => plan,
            Ok(_) => {
                tracing::debug!(tab = self.id, "jump aborted: path not resolvable");
                return NavOutcome::Failed;
            }
            Err(e) => {
                tracing::warn!(
                    tab = self.id,
                    "jump fetch failed: {}",
                    logic::errors::format_error_message(&e)
                );
                return NavOutcome::Failed;
            }
        };
        if base_depth >= self.columns.len() {
            return NavOutcome::Failed;
        }

        let mut columns: Vec<Column> = self.columns[..base_depth].to_vec();
        columns.extend(plan.columns);
        self.install_stack(columns, plan.focus);
        NavOutcome::Applied
    }

    /// Replace the whole stack and merge focus pairs in one step. Depth becomes
    /// the last column.
    pub fn install_stack(&mut self, columns: Vec<Column>, focus: impl IntoIterator<Item = (String, usize)>) {
        self.depth = if columns.is_empty() {
            None
        } else {
            Some(columns.len() - 1)
        };
        self.columns = columns;
        self.focus_memory.extend(focus);
        for column in &self.columns {
            self.focus_memory.insert(column.key(), column.focused_index);
        }
        self.preview = None;
    }

    /// Position of the tab in persistable form
    pub fn list_state(&self) -> ListState {
        ListState {
            path: self
                .visible_columns()
                .iter()
                .filter_map(|c| c.folder_id.clone())
                .collect(),
            focused_by_folder: self.focus_memory.clone(),
        }
    }

    // ============================================
    // RELOAD / PREVIEW
    // ============================================

    /// Replace the listing of every column showing `folder_id`.
    /// Returns whether anything in this tab displayed it.
    pub fn apply_listing(&mut self, folder_id: Option<&str>, items: &[Item]) -> bool {
        let mut touched = false;
        for column in self.columns.iter_mut().filter(|c| c.shows_folder(folder_id)) {
            column.replace_items(items.to_vec());
            self.focus_memory.insert(column.key(), column.focused_index);
            touched = true;
        }
        if let (Some(preview), Some(id)) = (self.preview.as_mut(), folder_id) {
            if preview.folder_id == id {
                preview.items = items.to_vec();
                touched = true;
            }
        }
        if touched {
            self.drop_detached_columns();
        }
        touched
    }

    /// Cut the stack at the first column whose folder is no longer listed by
    /// the column before it (the folder was moved away)
    fn drop_detached_columns(&mut self) {
        let detached = (1..self.columns.len()).find(|&i| match self.columns[i].folder_id.as_deref() {
            Some(id) => self.columns[i - 1].index_of(id).is_none(),
            None => true,
        });
        let Some(cut) = detached else {
            return;
        };

        tracing::debug!(tab = self.id, "dropping columns from {}: folder left its parent", cut);
        self.columns.truncate(cut);
        if self.depth.is_some_and(|depth| depth >= cut) {
            self.depth = Some(cut - 1);
            self.preview = None;
        }
    }

    /// Follow a folder rename in the column headers
    pub fn retitle_folder(&mut self, folder_id: &str, title: &str) -> bool {
        let mut touched = false;
        for column in self.columns.iter_mut().filter(|c| c.shows_folder(Some(folder_id))) {
            column.title = title.to_string();
            touched = true;
        }
        touched
    }

    /// Drop retained columns from the one showing a deleted folder onwards
    pub fn discard_deleted_folder(&mut self, folder_id: &str) {
        let Some(depth) = self.depth else {
            return;
        };
        if let Some(pos) = self.columns.iter().position(|c| c.shows_folder(Some(folder_id))) {
            if pos > depth {
                self.columns.truncate(pos);
            }
        }
        if matches!(&self.preview, Some(p) if p.folder_id == folder_id) {
            self.preview = None;
        }
    }

    /// Folder whose children the preview pane should show
    pub fn preview_target(&self) -> Option<&Item> {
        self.focused_item().filter(|item| item.is_folder())
    }

    /// Store a fetched preview if the focused folder is still the same
    pub fn set_preview(&mut self, folder_id: &str, items: Vec<Item>) -> bool {
        if self.preview_target().map(|i| i.id.as_str()) != Some(folder_id) {
            return false;
        }
        self.preview = Some(Preview {
            folder_id: folder_id.to_string(),
            items,
        });
        true
    }

    /// Structural invariants: depth inside the stack, focus inside each column
    pub fn invariants_hold(&self) -> bool {
        let depth_ok = match self.depth {
            None => true,
            Some(depth) => depth < self.columns.len(),
        };
        let focus_ok = self
            .columns
            .iter()
            .all(|c| c.focused_index < c.items.len().max(1));
        depth_ok && focus_ok
    }
}
