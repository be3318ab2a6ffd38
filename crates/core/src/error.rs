use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller does not hold enough Pomodoro points for the requested spend.
    #[error("Not enough points: {required} required, {available} available")]
    InsufficientFunds { required: i64, available: i64 },

    /// The entity is in a final state and cannot advance.
    #[error("Terminal state: {0}")]
    TerminalState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
