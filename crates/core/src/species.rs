//! Species assignment at hatch time.
//!
//! Prefers species the owner does not have yet, but never blocks a hatch:
//! once every species is owned, the full catalog becomes the candidate pool.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::types::DbId;

/// Species ids eligible for assignment, given the catalog and the ids
/// already owned.
///
/// Returns the unowned ids when there are any, otherwise the whole catalog.
pub fn candidate_species(all: &[DbId], owned: &HashSet<DbId>) -> Vec<DbId> {
    let unowned: Vec<DbId> = all
        .iter()
        .copied()
        .filter(|id| !owned.contains(id))
        .collect();

    if unowned.is_empty() {
        all.to_vec()
    } else {
        unowned
    }
}

/// Pick a species uniformly at random from the candidate pool.
///
/// Returns `None` only when the catalog is empty.
pub fn choose_species<R: Rng + ?Sized>(
    all: &[DbId],
    owned: &HashSet<DbId>,
    rng: &mut R,
) -> Option<DbId> {
    candidate_species(all, owned).choose(rng).copied()
}
