//! Todo task models.

use pomopet_core::error::CoreError;
use pomopet_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::store::validation_error;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: Option<DbId>,
    pub title: String,
    pub completed: bool,
    pub created_at: Timestamp,
}

/// DTO for `POST /tasks/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTask {
    /// Trim the title, then validate it. A whitespace-only title is blank.
    pub fn validated(&self) -> Result<CreateTask, CoreError> {
        let input = CreateTask {
            title: self.title.trim().to_string(),
            completed: self.completed,
        };
        input.validate().map_err(validation_error)?;
        Ok(input)
    }
}
