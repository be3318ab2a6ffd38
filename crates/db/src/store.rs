//! The storage boundary of the evolution and economy engine.
//!
//! Every method is one transaction: the implementation either applies all of
//! an operation's writes or none of them. Every method also receives the
//! [`Caller`] explicitly; ownership is enforced inside the store so no
//! route can forget it.

use std::collections::HashSet;

use async_trait::async_trait;
use pomopet_core::access::Caller;
use pomopet_core::collection::CollectionSummary;
use pomopet_core::error::CoreError;
use pomopet_core::progress::ProgressDelta;
use pomopet_core::species::choose_species;
use pomopet_core::types::DbId;
use serde::Serialize;

use crate::error::StoreError;
use crate::models::pet::{CreateEggPet, EggPetResponse};
use crate::models::progress::PomodoroProgress;
use crate::models::species::PetSpecies;
use crate::models::task::{CreateTask, Task};

/// What a full reset removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResetOutcome {
    pub pets_deleted: u64,
    pub progress_reset: bool,
}

#[async_trait]
pub trait PetStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    // -- Species -------------------------------------------------------------

    async fn list_species(&self) -> Result<Vec<PetSpecies>, StoreError>;

    // -- Pets ----------------------------------------------------------------

    /// The caller's pets, optionally filtered on `is_active`.
    async fn list_pets(
        &self,
        caller: &Caller,
        is_active: Option<bool>,
    ) -> Result<Vec<EggPetResponse>, StoreError>;

    /// Create a pet owned by the caller. Creating an active pet deactivates
    /// the caller's other pets.
    async fn create_pet(
        &self,
        caller: &Caller,
        input: &CreateEggPet,
    ) -> Result<EggPetResponse, StoreError>;

    /// Spend points to advance a pet one stage, binding a species on hatch.
    async fn evolve_pet(&self, caller: &Caller, pet_id: DbId)
        -> Result<EggPetResponse, StoreError>;

    /// Make a pet the owner's only active pet.
    async fn activate_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError>;

    /// Set a new nickname after trimming and length checks.
    async fn rename_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
        nickname: Option<&str>,
    ) -> Result<EggPetResponse, StoreError>;

    /// Send a pet back to `egg` and unbind its species.
    async fn reset_pet(&self, caller: &Caller, pet_id: DbId)
        -> Result<EggPetResponse, StoreError>;

    // -- Progress ------------------------------------------------------------

    /// The caller's progress record, created with zero values on first access.
    async fn get_progress(&self, caller: &Caller) -> Result<PomodoroProgress, StoreError>;

    /// Add completed-session deltas to the caller's progress record.
    async fn record_progress(
        &self,
        caller: &Caller,
        delta: ProgressDelta,
    ) -> Result<PomodoroProgress, StoreError>;

    /// Delete the caller's pets and zero their progress record if present.
    async fn full_reset(&self, caller: &Caller) -> Result<ResetOutcome, StoreError>;

    // -- Collection ----------------------------------------------------------

    async fn collection_summary(&self, caller: &Caller) -> Result<CollectionSummary, StoreError>;

    // -- Tasks ---------------------------------------------------------------

    async fn list_tasks(&self, caller: &Caller) -> Result<Vec<Task>, StoreError>;

    async fn create_task(&self, caller: &Caller, input: &CreateTask) -> Result<Task, StoreError>;

    async fn toggle_task(&self, caller: &Caller, task_id: DbId) -> Result<Task, StoreError>;
}

/// Draw the species for a hatching pet.
///
/// Fails before anything is written when the catalog is empty, since a
/// hatched pet must always carry a species.
pub(crate) fn draw_species(all: &[DbId], owned: &HashSet<DbId>) -> Result<DbId, CoreError> {
    choose_species(all, owned, &mut rand::rng()).ok_or_else(|| {
        CoreError::Validation("No pet species are available to hatch".to_string())
    })
}

/// Map a `validator` failure onto the domain taxonomy.
pub(crate) fn validation_error(errors: validator::ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

pub(crate) fn pet_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Pet", id }
}

pub(crate) fn task_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Task", id }
}
