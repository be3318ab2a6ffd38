//! Repository for the `tasks` table.

use pomopet_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::task::{CreateTask, Task};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, completed, created_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task for `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: Option<DbId>,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (user_id, title, completed)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(owner)
            .bind(&input.title)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    /// List an owner's tasks ordered by id.
    pub async fn list_by_owner(pool: &PgPool, owner: Option<DbId>) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE user_id IS NOT DISTINCT FROM $1 ORDER BY id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Fetch a task and lock its row until the transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Flip `completed`, returning the updated row.
    pub async fn toggle(conn: &mut PgConnection, id: DbId) -> Result<Task, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET completed = NOT completed, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
