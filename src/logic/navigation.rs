//! Focus index arithmetic
//!
//! Pure functions over a column's focus slot. Up/down wrap around the column;
//! `clamp_index` runs whenever a column's listing is replaced.

/// Focus one row further down the column, wrapping from the last row to the
/// first. A column with no focus yet starts at its first row.
///
/// ```
/// use notefinder::logic::navigation::next_selection;
///
/// assert_eq!(next_selection(Some(1), 3), Some(2));
/// assert_eq!(next_selection(Some(2), 3), Some(0));
/// assert_eq!(next_selection(None, 0), None);
/// ```
pub fn next_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    let last = list_len.checked_sub(1)?;
    Some(match current {
        Some(i) if i < last => i + 1,
        _ => 0,
    })
}

/// Focus one row further up the column, wrapping from the first row to the
/// last. A column with no focus yet starts at its last row.
///
/// ```
/// use notefinder::logic::navigation::prev_selection;
///
/// assert_eq!(prev_selection(Some(1), 3), Some(0));
/// assert_eq!(prev_selection(Some(0), 3), Some(2));
/// assert_eq!(prev_selection(None, 3), Some(2));
/// ```
pub fn prev_selection(current: Option<usize>, list_len: usize) -> Option<usize> {
    let last = list_len.checked_sub(1)?;
    Some(match current {
        Some(i) if i > 0 => (i - 1).min(last),
        _ => last,
    })
}

/// Pull a remembered or stale focus back inside a column of `len` rows.
/// An empty column keeps slot 0.
///
/// ```
/// use notefinder::logic::navigation::clamp_index;
///
/// assert_eq!(clamp_index(7, 3), 2);
/// assert_eq!(clamp_index(7, 0), 0);
/// ```
pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Top row of a column, `None` when it is empty
pub fn first_selection(list_len: usize) -> Option<usize> {
    (list_len > 0).then_some(0)
}

/// Bottom row of a column, `None` when it is empty
pub fn last_selection(list_len: usize) -> Option<usize> {
    list_len.checked_sub(1)
}
