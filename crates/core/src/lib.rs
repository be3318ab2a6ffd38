//! Domain rules for the Pomopet backend.
//!
//! Everything in this crate is pure logic evaluated against pre-loaded data.
//! Persistence lives in `pomopet-db`; HTTP lives in `pomopet-api`.

pub mod access;
pub mod collection;
pub mod error;
pub mod evolution;
pub mod pet;
pub mod progress;
pub mod species;
pub mod types;
