//! Pet stages and the evolution cost table.
//!
//! A pet walks a fixed chain `egg -> cracked -> hatched -> evolved`, paying
//! Pomodoro points for every step. `evolved` is terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STAGE_EGG: &str = "egg";
pub const STAGE_CRACKED: &str = "cracked";
pub const STAGE_HATCHED: &str = "hatched";
pub const STAGE_EVOLVED: &str = "evolved";

/// All valid stage strings, in evolution order.
pub const VALID_STAGES: &[&str] = &[STAGE_EGG, STAGE_CRACKED, STAGE_HATCHED, STAGE_EVOLVED];

/// Points needed to crack an egg.
pub const CRACK_COST: i64 = 1;
/// Points needed to hatch a cracked egg.
pub const HATCH_COST: i64 = 1;
/// Points needed to evolve a hatched pet.
pub const EVOLVE_COST: i64 = 3;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// A pet's position in its evolution chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Egg,
    Cracked,
    Hatched,
    Evolved,
}

impl Stage {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STAGE_EGG => Ok(Self::Egg),
            STAGE_CRACKED => Ok(Self::Cracked),
            STAGE_HATCHED => Ok(Self::Hatched),
            STAGE_EVOLVED => Ok(Self::Evolved),
            _ => Err(format!(
                "Invalid stage '{s}'. Must be one of: {}",
                VALID_STAGES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Egg => STAGE_EGG,
            Self::Cracked => STAGE_CRACKED,
            Self::Hatched => STAGE_HATCHED,
            Self::Evolved => STAGE_EVOLVED,
        }
    }

    /// The next step in the chain, or `None` for a terminal stage.
    pub fn next_step(&self) -> Option<EvolutionStep> {
        match self {
            Self::Egg => Some(EvolutionStep::new(Self::Egg, Self::Cracked, CRACK_COST)),
            Self::Cracked => Some(EvolutionStep::new(Self::Cracked, Self::Hatched, HATCH_COST)),
            Self::Hatched => Some(EvolutionStep::new(Self::Hatched, Self::Evolved, EVOLVE_COST)),
            Self::Evolved => None,
        }
    }

    /// Whether a pet at this stage must have a species bound.
    pub fn requires_species(&self) -> bool {
        matches!(self, Self::Hatched | Self::Evolved)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvolutionStep
// ---------------------------------------------------------------------------

/// One transition of the evolution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionStep {
    pub from: Stage,
    pub to: Stage,
    pub cost: i64,
}

impl EvolutionStep {
    const fn new(from: Stage, to: Stage, cost: i64) -> Self {
        Self { from, to, cost }
    }

    /// Whether this step binds a species to a pet that has none yet.
    ///
    /// Only the `cracked -> hatched` transition assigns a species.
    pub fn assigns_species(&self, has_species: bool) -> bool {
        self.from == Stage::Cracked && self.to == Stage::Hatched && !has_species
    }
}

/// Decide whether a pet at `stage` can evolve with `available` points.
///
/// Returns the step to apply. Nothing is mutated here; the caller deducts
/// `step.cost` and advances the stage only after this check succeeds.
pub fn plan_evolution(stage: Stage, available: i64) -> Result<EvolutionStep, CoreError> {
    let step = stage.next_step().ok_or_else(|| {
        CoreError::TerminalState("Pet cannot be evolved further".to_string())
    })?;

    if available < step.cost {
        return Err(CoreError::InsufficientFunds {
            required: step.cost,
            available,
        });
    }

    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_from_str_valid() {
        assert_eq!(Stage::from_str_value("egg").unwrap(), Stage::Egg);
        assert_eq!(Stage::from_str_value("cracked").unwrap(), Stage::Cracked);
        assert_eq!(Stage::from_str_value("hatched").unwrap(), Stage::Hatched);
        assert_eq!(Stage::from_str_value("evolved").unwrap(), Stage::Evolved);
    }

    #[test]
    fn stage_from_str_invalid() {
        let result = Stage::from_str_value("Egg");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid stage"));
    }

    #[test]
    fn stage_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Stage::Hatched).unwrap(), "hatched");
        let parsed: Stage = serde_json::from_str("\"cracked\"").unwrap();
        assert_eq!(parsed, Stage::Cracked);
    }

    #[test]
    fn evolution_table_costs() {
        let egg = Stage::Egg.next_step().unwrap();
        assert_eq!((egg.to, egg.cost), (Stage::Cracked, 1));

        let cracked = Stage::Cracked.next_step().unwrap();
        assert_eq!((cracked.to, cracked.cost), (Stage::Hatched, 1));

        let hatched = Stage::Hatched.next_step().unwrap();
        assert_eq!((hatched.to, hatched.cost), (Stage::Evolved, 3));

        assert!(Stage::Evolved.next_step().is_none());
    }

    #[test]
    fn evolved_is_terminal() {
        let result = plan_evolution(Stage::Evolved, 100);
        assert!(matches!(result, Err(CoreError::TerminalState(_))));
    }

    #[test]
    fn insufficient_points_rejected() {
        let result = plan_evolution(Stage::Hatched, 2);
        match result {
            Err(CoreError::InsufficientFunds {
                required,
                available,
            }) => {
                assert_eq!(required, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn exact_points_are_enough() {
        let step = plan_evolution(Stage::Egg, 1).unwrap();
        assert_eq!(step.to, Stage::Cracked);
    }

    #[test]
    fn only_hatching_assigns_species() {
        let hatch = Stage::Cracked.next_step().unwrap();
        assert!(hatch.assigns_species(false));
        assert!(!hatch.assigns_species(true));

        assert!(!Stage::Egg.next_step().unwrap().assigns_species(false));
        assert!(!Stage::Hatched.next_step().unwrap().assigns_species(false));
    }

    #[test]
    fn species_required_after_hatch() {
        assert!(!Stage::Egg.requires_species());
        assert!(!Stage::Cracked.requires_species());
        assert!(Stage::Hatched.requires_species());
        assert!(Stage::Evolved.requires_species());
    }
}
