//! Pomodoro progress models.

use pomopet_core::error::CoreError;
use pomopet_core::progress::{ProgressDelta, Tally};
use pomopet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// A row from the `pomodoro_progress` table. One row per owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PomodoroProgress {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: Option<DbId>,
    pub pomodoro_points: i64,
    pub pomodoros_completed: i64,
    pub updated_at: Timestamp,
}

impl PomodoroProgress {
    pub fn tally(&self) -> Tally {
        Tally {
            points: self.pomodoro_points,
            sessions: self.pomodoros_completed,
        }
    }
}

/// Payload for `PATCH /progress/`: `{"add_points": .., "add_sessions": ..}`.
///
/// Kept as a raw JSON object so that an explicit `null` can be told apart
/// from an omitted field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RecordProgress(pub Map<String, Value>);

impl RecordProgress {
    pub fn delta(&self) -> Result<ProgressDelta, CoreError> {
        ProgressDelta::from_raw(self.0.get("add_points"), self.0.get("add_sessions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: Value) -> RecordProgress {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn omitted_fields_are_zero() {
        let delta = payload(serde_json::json!({})).delta().unwrap();
        assert_eq!(delta, ProgressDelta::default());
    }

    #[test]
    fn session_completion_payload() {
        let delta = payload(serde_json::json!({"add_points": 1, "add_sessions": 1}))
            .delta()
            .unwrap();
        assert_eq!(delta.points, 1);
        assert_eq!(delta.sessions, 1);
    }

    #[test]
    fn explicit_null_is_rejected() {
        let result = payload(serde_json::json!({"add_points": null})).delta();
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
