//! Search Logic
//!
//! Matching for the jump-to palette over the flat item index. Queries with
//! wildcards go through the glob crate; plain queries are fuzzy-scored.

use std::collections::HashMap;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::repo::Item;

/// One palette row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub item: Item,
    pub score: i64,
    /// Human-readable location, e.g. `Documents / Work`
    pub location: String,
}

/// Whether the query should be read as a wildcard pattern
pub fn is_wildcard_query(query: &str) -> bool {
    query.contains(['*', '?', '['])
}

/// Match a wildcard query against an item title
///
/// # Pattern Rules
/// - "*" matches any sequence of characters
/// - Matches are case-insensitive
///
/// # Examples
/// ```
/// use notefinder::logic::search::glob_matches;
///
/// assert!(glob_matches("meet*", "Meeting Notes"));
/// assert!(glob_matches("*notes", "Meeting Notes"));
/// assert!(!glob_matches("notes*", "Meeting Notes"));
/// ```
pub fn glob_matches(query: &str, title: &str) -> bool {
    let query_lower = query.to_lowercase();
    let title_lower = title.to_lowercase();

    match glob::Pattern::new(&query_lower) {
        Ok(pattern) => pattern.matches(&title_lower),
        // Fallback: simple substring match (if glob pattern is invalid)
        Err(_) => title_lower.contains(query_lower.trim_matches(['*', '?', '['])),
    }
}

/// Breadcrumb of the folder holding `item`, built from the index
pub fn item_location(item: &Item, by_id: &HashMap<&str, &Item>) -> String {
    let mut parts = Vec::new();
    let mut current = item.parent_id.as_deref();
    // Bounded walk: a corrupt index must not hang the palette
    while let Some(id) = current {
        if parts.len() > by_id.len() {
            break;
        }
        match by_id.get(id) {
            Some(parent) => {
                parts.push(parent.title.as_str());
                current = parent.parent_id.as_deref();
            }
            None => break,
        }
    }
    if parts.is_empty() {
        return "/".to_string();
    }
    parts.reverse();
    parts.join(" / ")
}

/// Rank index items against a query, best first, at most `limit` rows
pub fn search_index(items: &[Item], query: &str, limit: usize) -> Vec<SearchHit> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();
    let query = query.trim();

    let mut hits: Vec<SearchHit> = if query.is_empty() {
        items.iter().map(|item| hit(item, 0, &by_id)).collect()
    } else if is_wildcard_query(query) {
        items
            .iter()
            .filter(|item| glob_matches(query, &item.title))
            .map(|item| hit(item, 0, &by_id))
            .collect()
    } else {
        let matcher = SkimMatcherV2::default().ignore_case();
        items
            .iter()
            .filter_map(|item| matcher.fuzzy_match(&item.title, query).map(|score| hit(item, score, &by_id)))
            .collect()
    };

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.item.title.to_lowercase().cmp(&b.item.title.to_lowercase()))
            .then_with(|| a.location.cmp(&b.location))
    });
    hits.truncate(limit);
    hits
}

fn hit(item: &Item, score: i64, by_id: &HashMap<&str, &Item>) -> SearchHit {
    SearchHit {
        item: item.clone(),
        score,
        location: item_location(item, by_id),
    }
}
