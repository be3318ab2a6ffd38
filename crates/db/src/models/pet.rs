//! Egg pet models and DTOs.

use pomopet_core::collection::PetHolding;
use pomopet_core::error::CoreError;
use pomopet_core::evolution::Stage;
use pomopet_core::pet::validate_nickname;
use pomopet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::species::PetSpecies;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `egg_pets` table.
#[derive(Debug, Clone, FromRow)]
pub struct EggPet {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub species_id: Option<DbId>,
    pub stage: String,
    pub nickname: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl EggPet {
    /// Parse the stored stage string.
    pub fn stage(&self) -> Result<Stage, CoreError> {
        Stage::from_str_value(&self.stage).map_err(CoreError::Internal)
    }

    /// The fields collection aggregation looks at.
    pub fn holding(&self) -> Result<PetHolding, CoreError> {
        Ok(PetHolding {
            species_id: self.species_id,
            stage: self.stage()?,
        })
    }
}

/// API representation of a pet, with the species resolved.
///
/// `species` carries the id accepted on write; `species_data` is the nested
/// catalog entry for reads.
#[derive(Debug, Clone, Serialize)]
pub struct EggPetResponse {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: Option<DbId>,
    pub species: Option<DbId>,
    pub species_data: Option<PetSpecies>,
    pub stage: Stage,
    pub nickname: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl EggPetResponse {
    /// Combine a pet row with its species row.
    pub fn from_parts(pet: EggPet, species: Option<PetSpecies>) -> Result<Self, CoreError> {
        let stage = pet.stage()?;
        Ok(Self {
            id: pet.id,
            user_id: pet.user_id,
            species: pet.species_id,
            species_data: species,
            stage,
            nickname: pet.nickname,
            is_active: pet.is_active,
            created_at: pet.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Payload for `POST /eggpets/`. The owner is always the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEggPet {
    pub nickname: Option<String>,
    #[serde(default)]
    pub species: Option<DbId>,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub is_active: bool,
}

/// A create payload that passed shape validation.
///
/// Species existence is checked by the store inside its transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEggPet {
    pub nickname: String,
    pub species_id: Option<DbId>,
    pub stage: Stage,
    pub is_active: bool,
}

impl CreateEggPet {
    pub fn validated(&self) -> Result<NewEggPet, CoreError> {
        let nickname = validate_nickname(self.nickname.as_deref())?;
        let stage = self.stage.unwrap_or_default();

        if stage.requires_species() && self.species.is_none() {
            return Err(CoreError::Validation(format!(
                "A {stage} pet must have a species"
            )));
        }

        Ok(NewEggPet {
            nickname,
            species_id: self.species,
            stage,
            is_active: self.is_active,
        })
    }
}

/// Payload for `PATCH /eggpets/{id}/rename/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenamePet {
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Query parameters for `GET /eggpets/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetListParams {
    pub is_active: Option<String>,
}

impl PetListParams {
    /// `?is_active=true` (any casing) filters active pets; any other value
    /// filters inactive ones; absence disables the filter.
    pub fn active_filter(&self) -> Option<bool> {
        self.is_active
            .as_deref()
            .map(|v| v.eq_ignore_ascii_case("true"))
    }
}
