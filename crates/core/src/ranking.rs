//! Reordering of vibes by how well they fit an occasion.

use std::collections::HashMap;

/// Stable reorder: items with a positive count come first by descending
/// count (ties keep their input order), followed by zero-count items in
/// input order.
///
/// `counts` maps an item key to the number of cocktails sharing both that
/// vibe and the selected occasion.
pub fn rank_by_counts<T, F>(items: Vec<T>, counts: &HashMap<String, i64>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let score = |item: &T| counts.get(key(item)).copied().unwrap_or(0);

    let (mut matching, rest): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| score(item) > 0);

    // `sort_by` is stable, so equal scores keep their original order.
    matching.sort_by(|a, b| score(b).cmp(&score(a)));
    matching.extend(rest);
    matching
}
