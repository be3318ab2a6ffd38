pub mod collection;
pub mod fallback;
pub mod pets;
pub mod progress;
pub mod reset;
pub mod species;
pub mod tasks;
