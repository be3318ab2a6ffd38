//! Caller identity and ownership checks.
//!
//! Every store operation receives an explicit [`Caller`]. Records carry an
//! optional owner; records without an owner belong to the anonymous bucket
//! and are open to every caller.

use crate::error::CoreError;
use crate::types::DbId;

/// The identity on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    /// Authenticated user id, or `None` for an anonymous caller.
    pub user_id: Option<DbId>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: DbId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// The owner key under which this caller's records are stored.
    pub fn owner(&self) -> Option<DbId> {
        self.user_id
    }
}

/// Reject the caller when `owner` is set to a different user.
pub fn ensure_can_modify(owner: Option<DbId>, caller: &Caller) -> Result<(), CoreError> {
    match owner {
        Some(owner_id) if caller.user_id != Some(owner_id) => {
            Err(CoreError::Forbidden("Unauthorized".to_string()))
        }
        _ => Ok(()),
    }
}
