//! Identity-based merging of relationship option lists.
//!
//! # Invariants
//! - Candidates without an identifier are never inserted.
//! - At most one entity per identifier is added; existing entries win.
//! - Accepted candidates come first, in acceptance order, then `base`.
//! - When nothing is accepted the input vector is returned untouched
//!   (same allocation), so callers can skip downstream refreshes.

use crate::model::entity::{EntityId, Identified};
use std::collections::HashSet;

/// Merges candidates that are missing from `base` in front of it.
///
/// `None` candidates are skipped. Accepted candidates are cloned.
pub fn merge_missing<'a, E, I>(base: Vec<E>, candidates: I) -> Vec<E>
where
    E: Identified + Clone + 'a,
    I: IntoIterator<Item = Option<&'a E>>,
{
    let mut known: Option<HashSet<EntityId>> = None;
    let mut accepted: Vec<E> = Vec::new();

    for candidate in candidates.into_iter().flatten() {
        let Some(id) = candidate.identifier() else {
            continue;
        };
        let known = known.get_or_insert_with(|| {
            base.iter()
                .filter_map(Identified::identifier)
                .collect::<HashSet<_>>()
        });
        if known.insert(id) {
            accepted.push(candidate.clone());
        }
    }

    if accepted.is_empty() {
        return base;
    }

    accepted.reserve(base.len());
    accepted.extend(base);
    accepted
}
