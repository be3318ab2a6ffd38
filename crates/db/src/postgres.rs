//! PostgreSQL-backed [`PetStore`].
//!
//! Each mutating operation runs in one transaction. Rows are locked in a
//! fixed order, pets before the owner's progress row, so concurrent
//! operations for one owner serialize without deadlocking.

use std::collections::HashMap;

use async_trait::async_trait;
use pomopet_core::access::{ensure_can_modify, Caller};
use pomopet_core::collection::{summarize, CollectionSummary, PetHolding, SpeciesEntry};
use pomopet_core::error::CoreError;
use pomopet_core::evolution::{plan_evolution, Stage};
use pomopet_core::progress::{ProgressDelta, Tally};
use pomopet_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::StoreError;
use crate::models::pet::{CreateEggPet, EggPet, EggPetResponse};
use crate::models::progress::PomodoroProgress;
use crate::models::species::PetSpecies;
use crate::models::task::{CreateTask, Task};
use crate::repositories::{PetRepo, ProgressRepo, SpeciesRepo, TaskRepo};
use crate::store::{draw_species, pet_not_found, task_not_found, PetStore, ResetOutcome};

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Resolve the species row of a pet for its API representation.
async fn hydrate(conn: &mut PgConnection, pet: EggPet) -> Result<EggPetResponse, StoreError> {
    let species = match pet.species_id {
        Some(id) => SpeciesRepo::find_by_id(&mut *conn, id).await?,
        None => None,
    };
    Ok(EggPetResponse::from_parts(pet, species)?)
}

#[async_trait]
impl PetStore for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_species(&self) -> Result<Vec<PetSpecies>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(SpeciesRepo::list(&mut conn).await?)
    }

    async fn list_pets(
        &self,
        caller: &Caller,
        is_active: Option<bool>,
    ) -> Result<Vec<EggPetResponse>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let pets = PetRepo::list_by_owner(&mut conn, caller.owner(), is_active).await?;
        let species: HashMap<DbId, PetSpecies> = SpeciesRepo::list(&mut conn)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let mut responses = Vec::with_capacity(pets.len());
        for pet in pets {
            let data = pet.species_id.and_then(|id| species.get(&id).cloned());
            responses.push(EggPetResponse::from_parts(pet, data)?);
        }
        Ok(responses)
    }

    async fn create_pet(
        &self,
        caller: &Caller,
        input: &CreateEggPet,
    ) -> Result<EggPetResponse, StoreError> {
        let new_pet = input.validated()?;
        let owner = caller.owner();
        let mut tx = self.pool.begin().await?;

        if let Some(species_id) = new_pet.species_id {
            SpeciesRepo::find_by_id(&mut *tx, species_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Validation(format!("Species {species_id} does not exist"))
                })?;
        }

        if new_pet.is_active {
            PetRepo::lock_owner(&mut *tx, owner).await?;
            PetRepo::lock_owner_pets(&mut *tx, owner).await?;
            PetRepo::deactivate_owner(&mut *tx, owner).await?;
        }

        let pet = PetRepo::create(&mut *tx, owner, &new_pet).await?;
        let response = hydrate(&mut *tx, pet).await?;
        tx.commit().await?;

        tracing::info!(pet_id = response.id, owner = ?owner, "Pet created");
        Ok(response)
    }

    async fn evolve_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        let mut tx = self.pool.begin().await?;

        let pet = PetRepo::find_for_update(&mut *tx, pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?;
        ensure_can_modify(pet.user_id, caller)?;
        let stage = pet.stage()?;

        let progress = ProgressRepo::get_or_create_for_update(&mut *tx, pet.user_id).await?;
        let step = plan_evolution(stage, progress.pomodoro_points)?;

        let mut species_id = pet.species_id;
        if step.assigns_species(species_id.is_some()) {
            let all = SpeciesRepo::list_ids(&mut *tx).await?;
            let owned = PetRepo::owned_species_ids(&mut *tx, pet.user_id).await?;
            species_id = Some(draw_species(&all, &owned)?);
        }

        let tally = Tally {
            points: progress.pomodoro_points - step.cost,
            sessions: progress.pomodoros_completed,
        };
        ProgressRepo::set_tally(&mut *tx, progress.id, tally).await?;
        let updated = PetRepo::set_stage_and_species(&mut *tx, pet.id, step.to, species_id).await?;
        let response = hydrate(&mut *tx, updated).await?;
        tx.commit().await?;

        tracing::info!(
            pet_id,
            from = %step.from,
            to = %step.to,
            cost = step.cost,
            species_id = ?species_id,
            "Pet evolved",
        );
        Ok(response)
    }

    async fn activate_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Owner ids never change, so an unlocked read is enough to find the
        // set of rows to lock.
        let owner = PetRepo::find_by_id(&mut *tx, pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?
            .user_id;
        ensure_can_modify(owner, caller)?;

        PetRepo::lock_owner_pets(&mut *tx, owner).await?;
        PetRepo::deactivate_owner(&mut *tx, owner).await?;
        let pet = PetRepo::set_active(&mut *tx, pet_id).await?;
        let response = hydrate(&mut *tx, pet).await?;
        tx.commit().await?;

        tracing::info!(pet_id, owner = ?owner, "Pet activated");
        Ok(response)
    }

    async fn rename_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
        nickname: Option<&str>,
    ) -> Result<EggPetResponse, StoreError> {
        let mut tx = self.pool.begin().await?;

        let pet = PetRepo::find_for_update(&mut *tx, pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?;
        ensure_can_modify(pet.user_id, caller)?;
        let nickname = pomopet_core::pet::validate_nickname(nickname)?;

        let pet = PetRepo::set_nickname(&mut *tx, pet_id, &nickname).await?;
        let response = hydrate(&mut *tx, pet).await?;
        tx.commit().await?;

        tracing::info!(pet_id, "Pet renamed");
        Ok(response)
    }

    async fn reset_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        let mut tx = self.pool.begin().await?;

        let pet = PetRepo::find_for_update(&mut *tx, pet_id)
            .await?
            .ok_or_else(|| pet_not_found(pet_id))?;
        ensure_can_modify(pet.user_id, caller)?;

        let pet = PetRepo::set_stage_and_species(&mut *tx, pet_id, Stage::Egg, None).await?;
        let response = hydrate(&mut *tx, pet).await?;
        tx.commit().await?;

        tracing::info!(pet_id, "Pet reset to egg");
        Ok(response)
    }

    async fn get_progress(&self, caller: &Caller) -> Result<PomodoroProgress, StoreError> {
        let mut conn = self.pool.acquire().await?;
        ProgressRepo::ensure(&mut conn, caller.owner()).await?;
        ProgressRepo::find_by_owner(&mut conn, caller.owner())
            .await?
            .ok_or_else(|| CoreError::Internal("Progress record missing after insert".into()).into())
    }

    async fn record_progress(
        &self,
        caller: &Caller,
        delta: ProgressDelta,
    ) -> Result<PomodoroProgress, StoreError> {
        let mut tx = self.pool.begin().await?;

        let progress = ProgressRepo::get_or_create_for_update(&mut *tx, caller.owner()).await?;
        let tally = progress.tally().apply(delta)?;
        let progress = ProgressRepo::set_tally(&mut *tx, progress.id, tally).await?;
        tx.commit().await?;

        tracing::info!(
            owner = ?caller.owner(),
            add_points = delta.points,
            add_sessions = delta.sessions,
            points = progress.pomodoro_points,
            "Progress recorded",
        );
        Ok(progress)
    }

    async fn full_reset(&self, caller: &Caller) -> Result<ResetOutcome, StoreError> {
        let owner = caller.owner();
        let mut tx = self.pool.begin().await?;

        PetRepo::lock_owner_pets(&mut *tx, owner).await?;
        let pets_deleted = PetRepo::delete_by_owner(&mut *tx, owner).await?;
        let progress_reset = ProgressRepo::reset_by_owner(&mut *tx, owner).await?;
        tx.commit().await?;

        tracing::warn!(owner = ?owner, pets_deleted, progress_reset, "Full reset");
        Ok(ResetOutcome {
            pets_deleted,
            progress_reset,
        })
    }

    async fn collection_summary(&self, caller: &Caller) -> Result<CollectionSummary, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let species: Vec<SpeciesEntry> = SpeciesRepo::list(&mut conn)
            .await?
            .iter()
            .map(PetSpecies::to_entry)
            .collect();
        let holdings = PetRepo::list_by_owner(&mut conn, caller.owner(), None)
            .await?
            .iter()
            .map(EggPet::holding)
            .collect::<Result<Vec<PetHolding>, CoreError>>()?;

        Ok(summarize(&species, &holdings))
    }

    async fn list_tasks(&self, caller: &Caller) -> Result<Vec<Task>, StoreError> {
        Ok(TaskRepo::list_by_owner(&self.pool, caller.owner()).await?)
    }

    async fn create_task(&self, caller: &Caller, input: &CreateTask) -> Result<Task, StoreError> {
        let input = input.validated()?;
        let task = TaskRepo::create(&self.pool, caller.owner(), &input).await?;
        tracing::info!(task_id = task.id, "Task created");
        Ok(task)
    }

    async fn toggle_task(&self, caller: &Caller, task_id: DbId) -> Result<Task, StoreError> {
        let mut tx = self.pool.begin().await?;

        let task = TaskRepo::find_for_update(&mut *tx, task_id)
            .await?
            .ok_or_else(|| task_not_found(task_id))?;
        ensure_can_modify(task.user_id, caller)?;

        let task = TaskRepo::toggle(&mut *tx, task_id).await?;
        tx.commit().await?;

        tracing::info!(task_id, completed = task.completed, "Task toggled");
        Ok(task)
    }
}
