//! Pet species catalog models.

use pomopet_core::collection::SpeciesEntry;
use pomopet_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `pet_species` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PetSpecies {
    pub id: DbId,
    pub name: String,
    /// Base image reference.
    pub image: String,
    pub evolved_image: Option<String>,
}

impl PetSpecies {
    /// The catalog view used by collection aggregation.
    pub fn to_entry(&self) -> SpeciesEntry {
        SpeciesEntry {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            evolved_image: self.evolved_image.clone(),
        }
    }
}

/// DTO for seeding a species (SQL fixtures, seed files, tests).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePetSpecies {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub image: String,
    pub evolved_image: Option<String>,
}
