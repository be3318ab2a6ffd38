//! Pomodoro point bookkeeping.
//!
//! Session completions arrive as loosely typed JSON (`{"add_points": 1,
//! "add_sessions": "1"}`); this module coerces them into integer deltas and
//! applies them to a progress tally.

use serde_json::Value;

use crate::error::CoreError;

/// Integer deltas to add to a progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressDelta {
    pub points: i64,
    pub sessions: i64,
}

impl ProgressDelta {
    /// Build a delta from the raw `add_points` / `add_sessions` fields.
    ///
    /// Absent fields count as zero. Negative values pass through; callers
    /// are expected to send non-negative deltas.
    pub fn from_raw(points: Option<&Value>, sessions: Option<&Value>) -> Result<Self, CoreError> {
        Ok(Self {
            points: coerce_integer("add_points", points)?,
            sessions: coerce_integer("add_sessions", sessions)?,
        })
    }
}

/// A points/sessions tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub points: i64,
    pub sessions: i64,
}

impl Tally {
    /// Add `delta` to this tally. Overflow is reported as a validation error.
    pub fn apply(self, delta: ProgressDelta) -> Result<Self, CoreError> {
        let points = self
            .points
            .checked_add(delta.points)
            .ok_or_else(|| CoreError::Validation("add_points is out of range".to_string()))?;
        let sessions = self
            .sessions
            .checked_add(delta.sessions)
            .ok_or_else(|| CoreError::Validation("add_sessions is out of range".to_string()))?;
        Ok(Self { points, sessions })
    }
}

/// Coerce a JSON value into an integer.
///
/// Accepts integers, other numbers (truncated toward zero) and strings that
/// hold an integer. `None` means the field was omitted and yields zero.
pub fn coerce_integer(field: &str, value: Option<&Value>) -> Result<i64, CoreError> {
    let invalid = || CoreError::Validation(format!("{field} must be an integer"));

    let Some(value) = value else {
        return Ok(0);
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                let f = n.as_f64().ok_or_else(invalid)?;
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated <= i64::MAX as f64
                {
                    Ok(truncated as i64)
                } else {
                    Err(invalid())
                }
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let delta = ProgressDelta::from_raw(None, None).unwrap();
        assert_eq!(delta, ProgressDelta::default());
    }

    #[test]
    fn integers_and_numeric_strings_accepted() {
        let delta = ProgressDelta::from_raw(Some(&json!(2)), Some(&json!(" 3 "))).unwrap();
        assert_eq!(delta.points, 2);
        assert_eq!(delta.sessions, 3);
    }

    #[test]
    fn floats_truncate() {
        assert_eq!(coerce_integer("x", Some(&json!(2.9))).unwrap(), 2);
        assert_eq!(coerce_integer("x", Some(&json!(-1.5))).unwrap(), -1);
    }

    #[test]
    fn non_numeric_input_rejected() {
        for value in [json!("abc"), json!("1.5"), json!(null), json!(true), json!([1])] {
            let err = coerce_integer("add_points", Some(&value)).unwrap_err();
            assert!(err.to_string().contains("add_points must be an integer"));
        }
    }

    #[test]
    fn apply_adds_both_counters() {
        let tally = Tally {
            points: 4,
            sessions: 10,
        };
        let next = tally
            .apply(ProgressDelta {
                points: 1,
                sessions: 1,
            })
            .unwrap();
        assert_eq!(
            next,
            Tally {
                points: 5,
                sessions: 11
            }
        );
    }

    #[test]
    fn apply_overflow_rejected() {
        let tally = Tally {
            points: i64::MAX,
            sessions: 0,
        };
        let result = tally.apply(ProgressDelta {
            points: 1,
            sessions: 0,
        });
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
