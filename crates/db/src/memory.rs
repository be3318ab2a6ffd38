//! In-process [`PetStore`] for development and tests.
//!
//! All state sits behind one [`tokio::sync::Mutex`] and every operation runs
//! start to finish while holding it. Operations compute every check before
//! the first write, so a failed call leaves the state untouched.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use pomopet_core::access::{ensure_can_modify, Caller};
use pomopet_core::collection::{summarize, CollectionSummary, PetHolding, SpeciesEntry};
use pomopet_core::error::CoreError;
use pomopet_core::evolution::{plan_evolution, Stage};
use pomopet_core::pet::validate_nickname;
use pomopet_core::progress::ProgressDelta;
use pomopet_core::types::DbId;
use tokio::sync::Mutex;
use validator::Validate;

use crate::error::StoreError;
use crate::models::pet::{CreateEggPet, EggPet, EggPetResponse};
use crate::models::progress::PomodoroProgress;
use crate::models::species::{CreatePetSpecies, PetSpecies};
use crate::models::task::{CreateTask, Task};
use crate::store::{
    draw_species, pet_not_found, task_not_found, validation_error, PetStore, ResetOutcome,
};

#[derive(Debug, Default)]
struct MemoryState {
    species: Vec<PetSpecies>,
    pets: BTreeMap<DbId, EggPet>,
    progress: Vec<PomodoroProgress>,
    tasks: BTreeMap<DbId, Task>,
    last_id: DbId,
}

impl MemoryState {
    /// Ids are shared across tables; callers only rely on uniqueness.
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn pet(&self, id: DbId) -> Result<&EggPet, CoreError> {
        self.pets.get(&id).ok_or_else(|| pet_not_found(id))
    }

    fn pet_mut(&mut self, id: DbId) -> Result<&mut EggPet, CoreError> {
        self.pets.get_mut(&id).ok_or_else(|| pet_not_found(id))
    }

    fn species_by_id(&self, id: DbId) -> Option<&PetSpecies> {
        self.species.iter().find(|s| s.id == id)
    }

    fn owner_pets(&self, owner: Option<DbId>) -> impl Iterator<Item = &EggPet> {
        self.pets.values().filter(move |p| p.user_id == owner)
    }

    fn hydrate(&self, pet: &EggPet) -> Result<EggPetResponse, CoreError> {
        let species = pet
            .species_id
            .and_then(|id| self.species_by_id(id))
            .cloned();
        EggPetResponse::from_parts(pet.clone(), species)
    }

    fn progress_index(&self, owner: Option<DbId>) -> Option<usize> {
        self.progress.iter().position(|p| p.user_id == owner)
    }

    /// Fetch-or-create the progress record for `owner`.
    fn progress_mut(&mut self, owner: Option<DbId>) -> &mut PomodoroProgress {
        let index = match self.progress_index(owner) {
            Some(index) => index,
            None => {
                let id = self.next_id();
                self.progress.push(PomodoroProgress {
                    id,
                    user_id: owner,
                    pomodoro_points: 0,
                    pomodoros_completed: 0,
                    updated_at: Utc::now(),
                });
                self.progress.len() - 1
            }
        };
        &mut self.progress[index]
    }

    fn current_points(&self, owner: Option<DbId>) -> i64 {
        self.progress_index(owner)
            .map(|i| self.progress[i].pomodoro_points)
            .unwrap_or(0)
    }

    fn deactivate_owner(&mut self, owner: Option<DbId>) {
        for pet in self.pets.values_mut().filter(|p| p.user_id == owner) {
            pet.is_active = false;
        }
    }

    fn create_pet(
        &mut self,
        caller: &Caller,
        input: &CreateEggPet,
    ) -> Result<EggPetResponse, CoreError> {
        let new_pet = input.validated()?;
        if let Some(species_id) = new_pet.species_id {
            if self.species_by_id(species_id).is_none() {
                return Err(CoreError::Validation(format!(
                    "Species {species_id} does not exist"
                )));
            }
        }

        let owner = caller.owner();
        if new_pet.is_active {
            self.deactivate_owner(owner);
        }

        let pet = EggPet {
            id: self.next_id(),
            user_id: owner,
            species_id: new_pet.species_id,
            stage: new_pet.stage.as_str().to_string(),
            nickname: new_pet.nickname,
            is_active: new_pet.is_active,
            created_at: Utc::now(),
        };
        let response = self.hydrate(&pet)?;
        self.pets.insert(pet.id, pet);
        Ok(response)
    }

    fn evolve_pet(&mut self, caller: &Caller, pet_id: DbId) -> Result<EggPetResponse, CoreError> {
        let pet = self.pet(pet_id)?;
        ensure_can_modify(pet.user_id, caller)?;
        let owner = pet.user_id;
        let mut species_id = pet.species_id;

        let step = plan_evolution(pet.stage()?, self.current_points(owner))?;

        if step.assigns_species(species_id.is_some()) {
            let all: Vec<DbId> = self.species.iter().map(|s| s.id).collect();
            let owned: HashSet<DbId> = self
                .owner_pets(owner)
                .filter_map(|p| p.species_id)
                .collect();
            species_id = Some(draw_species(&all, &owned)?);
        }

        let progress = self.progress_mut(owner);
        progress.pomodoro_points -= step.cost;
        progress.updated_at = Utc::now();

        let pet = self.pet_mut(pet_id)?;
        pet.stage = step.to.as_str().to_string();
        pet.species_id = species_id;

        tracing::info!(
            pet_id,
            from = %step.from,
            to = %step.to,
            cost = step.cost,
            species_id = ?species_id,
            "Pet evolved",
        );
        let pet = self.pet(pet_id)?;
        self.hydrate(pet)
    }

    fn activate_pet(&mut self, caller: &Caller, pet_id: DbId) -> Result<EggPetResponse, CoreError> {
        let owner = self.pet(pet_id)?.user_id;
        ensure_can_modify(owner, caller)?;

        self.deactivate_owner(owner);
        self.pet_mut(pet_id)?.is_active = true;

        tracing::info!(pet_id, owner = ?owner, "Pet activated");
        self.hydrate(self.pet(pet_id)?)
    }

    fn rename_pet(
        &mut self,
        caller: &Caller,
        pet_id: DbId,
        nickname: Option<&str>,
    ) -> Result<EggPetResponse, CoreError> {
        ensure_can_modify(self.pet(pet_id)?.user_id, caller)?;
        let nickname = validate_nickname(nickname)?;

        self.pet_mut(pet_id)?.nickname = nickname;

        tracing::info!(pet_id, "Pet renamed");
        self.hydrate(self.pet(pet_id)?)
    }

    fn reset_pet(&mut self, caller: &Caller, pet_id: DbId) -> Result<EggPetResponse, CoreError> {
        ensure_can_modify(self.pet(pet_id)?.user_id, caller)?;

        let pet = self.pet_mut(pet_id)?;
        pet.stage = Stage::Egg.as_str().to_string();
        pet.species_id = None;

        tracing::info!(pet_id, "Pet reset to egg");
        self.hydrate(self.pet(pet_id)?)
    }

    fn record_progress(
        &mut self,
        caller: &Caller,
        delta: ProgressDelta,
    ) -> Result<PomodoroProgress, CoreError> {
        let progress = self.progress_mut(caller.owner());
        let tally = progress.tally().apply(delta)?;
        progress.pomodoro_points = tally.points;
        progress.pomodoros_completed = tally.sessions;
        progress.updated_at = Utc::now();
        Ok(progress.clone())
    }

    fn full_reset(&mut self, caller: &Caller) -> ResetOutcome {
        let owner = caller.owner();
        let before = self.pets.len();
        self.pets.retain(|_, p| p.user_id != owner);
        let pets_deleted = (before - self.pets.len()) as u64;

        let progress_reset = match self.progress_index(owner) {
            Some(index) => {
                let progress = &mut self.progress[index];
                progress.pomodoro_points = 0;
                progress.pomodoros_completed = 0;
                progress.updated_at = Utc::now();
                true
            }
            None => false,
        };

        ResetOutcome {
            pets_deleted,
            progress_reset,
        }
    }

    fn collection_summary(&self, caller: &Caller) -> Result<CollectionSummary, CoreError> {
        let species: Vec<SpeciesEntry> = self.species.iter().map(PetSpecies::to_entry).collect();
        let holdings = self
            .owner_pets(caller.owner())
            .map(EggPet::holding)
            .collect::<Result<Vec<PetHolding>, CoreError>>()?;
        Ok(summarize(&species, &holdings))
    }

    fn toggle_task(&mut self, caller: &Caller, task_id: DbId) -> Result<Task, CoreError> {
        let task = self
            .tasks
            .get_mut(&task_id)
            .ok_or_else(|| task_not_found(task_id))?;
        ensure_can_modify(task.user_id, caller)?;
        task.completed = !task.completed;
        Ok(task.clone())
    }
}

/// Store that keeps everything in memory. State is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a species to the catalog.
    pub async fn seed_species(&self, input: &CreatePetSpecies) -> Result<PetSpecies, StoreError> {
        input.validate().map_err(validation_error)?;

        let mut state = self.state.lock().await;
        let species = PetSpecies {
            id: state.next_id(),
            name: input.name.clone(),
            image: input.image.clone(),
            evolved_image: input.evolved_image.clone(),
        };
        state.species.push(species.clone());
        Ok(species)
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_species(&self) -> Result<Vec<PetSpecies>, StoreError> {
        Ok(self.state.lock().await.species.clone())
    }

    async fn list_pets(
        &self,
        caller: &Caller,
        is_active: Option<bool>,
    ) -> Result<Vec<EggPetResponse>, StoreError> {
        let state = self.state.lock().await;
        let pets = state
            .owner_pets(caller.owner())
            .filter(|p| is_active.map_or(true, |active| p.is_active == active))
            .map(|p| state.hydrate(p))
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(pets)
    }

    async fn create_pet(
        &self,
        caller: &Caller,
        input: &CreateEggPet,
    ) -> Result<EggPetResponse, StoreError> {
        let pet = self.state.lock().await.create_pet(caller, input)?;
        tracing::info!(pet_id = pet.id, owner = ?caller.owner(), "Pet created");
        Ok(pet)
    }

    async fn evolve_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        Ok(self.state.lock().await.evolve_pet(caller, pet_id)?)
    }

    async fn activate_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        Ok(self.state.lock().await.activate_pet(caller, pet_id)?)
    }

    async fn rename_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
        nickname: Option<&str>,
    ) -> Result<EggPetResponse, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .rename_pet(caller, pet_id, nickname)?)
    }

    async fn reset_pet(
        &self,
        caller: &Caller,
        pet_id: DbId,
    ) -> Result<EggPetResponse, StoreError> {
        Ok(self.state.lock().await.reset_pet(caller, pet_id)?)
    }

    async fn get_progress(&self, caller: &Caller) -> Result<PomodoroProgress, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .progress_mut(caller.owner())
            .clone())
    }

    async fn record_progress(
        &self,
        caller: &Caller,
        delta: ProgressDelta,
    ) -> Result<PomodoroProgress, StoreError> {
        let progress = self.state.lock().await.record_progress(caller, delta)?;
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
        let outcome = self.state.lock().await.full_reset(caller);
        tracing::warn!(
            owner = ?caller.owner(),
            pets_deleted = outcome.pets_deleted,
            progress_reset = outcome.progress_reset,
            "Full reset",
        );
        Ok(outcome)
    }

    async fn collection_summary(&self, caller: &Caller) -> Result<CollectionSummary, StoreError> {
        Ok(self.state.lock().await.collection_summary(caller)?)
    }

    async fn list_tasks(&self, caller: &Caller) -> Result<Vec<Task>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.user_id == caller.owner())
            .cloned()
            .collect())
    }

    async fn create_task(&self, caller: &Caller, input: &CreateTask) -> Result<Task, StoreError> {
        let input = input.validated()?;

        let mut state = self.state.lock().await;
        let task = Task {
            id: state.next_id(),
            user_id: caller.owner(),
            title: input.title,
            completed: input.completed,
            created_at: Utc::now(),
        };
        state.tasks.insert(task.id, task.clone());
        tracing::info!(task_id = task.id, "Task created");
        Ok(task)
    }

    async fn toggle_task(&self, caller: &Caller, task_id: DbId) -> Result<Task, StoreError> {
        let task = self.state.lock().await.toggle_task(caller, task_id)?;
        tracing::info!(task_id, completed = task.completed, "Task toggled");
        Ok(task)
    }
}
