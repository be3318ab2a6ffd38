//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Request payloads and query parameters for the matching endpoints

pub mod pet;
pub mod progress;
pub mod species;
pub mod task;
