//! Collection completion tracking.
//!
//! The collection is the set of distinct species bound to an owner's pets.
//! A species counts as evolved when at least one pet of that species has
//! reached the `evolved` stage.

use std::collections::HashSet;

use serde::Serialize;

use crate::evolution::Stage;
use crate::types::DbId;

/// Catalog data needed to render a collected species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesEntry {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub evolved_image: Option<String>,
}

/// The parts of a pet that matter for the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetHolding {
    pub species_id: Option<DbId>,
    pub stage: Stage,
}

/// One species in the owner's collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedSpecies {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub evolved_image: Option<String>,
    pub is_evolved: bool,
    /// The image the UI should show: evolved art when unlocked, else base art.
    pub display_image: String,
}

/// Aggregated collection statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub total_species: i64,
    pub collected_count: i64,
    pub has_all: bool,
    pub collected_species: Vec<CollectedSpecies>,
}

/// Distinct species ids bound to any of `pets`.
pub fn owned_species_ids(pets: &[PetHolding]) -> HashSet<DbId> {
    pets.iter().filter_map(|p| p.species_id).collect()
}

/// Build the collection summary from the species catalog and the owner's pets.
///
/// Collected entries keep the catalog order.
pub fn summarize(species: &[SpeciesEntry], pets: &[PetHolding]) -> CollectionSummary {
    let owned = owned_species_ids(pets);
    let evolved: HashSet<DbId> = pets
        .iter()
        .filter(|p| p.stage == Stage::Evolved)
        .filter_map(|p| p.species_id)
        .collect();

    let collected_species: Vec<CollectedSpecies> = species
        .iter()
        .filter(|s| owned.contains(&s.id))
        .map(|s| {
            let is_evolved = evolved.contains(&s.id);
            let display_image = match (&s.evolved_image, is_evolved) {
                (Some(evolved_image), true) if !evolved_image.is_empty() => evolved_image.clone(),
                _ => s.image.clone(),
            };
            CollectedSpecies {
                id: s.id,
                name: s.name.clone(),
                image: s.image.clone(),
                evolved_image: s.evolved_image.clone(),
                is_evolved,
                display_image,
            }
        })
        .collect();

    let total_species = species.len() as i64;
    let collected_count = collected_species.len() as i64;

    CollectionSummary {
        total_species,
        collected_count,
        has_all: total_species > 0 && collected_count >= total_species,
        collected_species,
    }
}
