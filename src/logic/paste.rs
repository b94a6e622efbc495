//! Paste planning
//!
//! Pure functions deciding which staged items actually move and which folder
//! listings must be reloaded afterwards.

use std::collections::HashSet;

use crate::model::clipboard::CutBuffer;
use crate::repo::{Item, ItemKind};

/// How the move should be issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveCall {
    /// Nothing to move (every item already lives in the target)
    None,
    Single { id: String, kind: ItemKind },
    Batch(Vec<(String, ItemKind)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePlan {
    pub target: Option<String>,
    pub call: MoveCall,
    /// Source folders plus the target: every listing a successful move touches
    pub affected: HashSet<Option<String>>,
}

/// Filter out no-op moves and pick the single or batch call
///
/// Items already in `target` are skipped, as is a folder pasted into itself.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use notefinder::logic::paste::{plan_paste, MoveCall};
/// use notefinder::model::clipboard::CutBuffer;
/// use notefinder::repo::{Item, ItemKind};
///
/// let note = Item {
///     id: "n".into(),
///     kind: ItemKind::Note,
///     title: "n".into(),
///     parent_id: Some("f".into()),
/// };
/// let buffer = CutBuffer {
///     items: vec![note],
///     source_folder_ids: HashSet::from([Some("f".to_string())]),
/// };
///
/// // Pasting back into its own folder moves nothing
/// assert_eq!(plan_paste(&buffer, Some("f")).call, MoveCall::None);
/// ```
pub fn plan_paste(buffer: &CutBuffer, target: Option<&str>) -> PastePlan {
    let movable: Vec<&Item> = buffer
        .items
        .iter()
        .filter(|item| !item.is_in(target))
        .filter(|item| Some(item.id.as_str()) != target)
        .collect();

    let call = match movable.as_slice() {
        [] => MoveCall::None,
        [one] => MoveCall::Single {
            id: one.id.clone(),
            kind: one.kind,
        },
        many => MoveCall::Batch(many.iter().map(|i| (i.id.clone(), i.kind)).collect()),
    };

    let mut affected = buffer.source_folder_ids.clone();
    affected.insert(target.map(str::to_string));

    PastePlan {
        target: target.map(str::to_string),
        call,
        affected,
    }
}
