//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async SQL methods.
//! Read-only lookups take `&PgPool`; anything that participates in a store
//! transaction takes `&mut PgConnection` so callers can pass `&mut *tx`.

pub mod pet_repo;
pub mod progress_repo;
pub mod species_repo;
pub mod task_repo;

pub use pet_repo::PetRepo;
pub use progress_repo::ProgressRepo;
pub use species_repo::SpeciesRepo;
pub use task_repo::TaskRepo;
