//! Repository for the `pomodoro_progress` table.

use pomopet_core::progress::Tally;
use pomopet_core::types::DbId;
use sqlx::PgConnection;

use crate::models::progress::PomodoroProgress;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, pomodoro_points, pomodoros_completed, updated_at";

/// Provides lookup-or-create and update operations for progress records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Make sure a zeroed record exists for `owner`. No-op if one does.
    pub async fn ensure(conn: &mut PgConnection, owner: Option<DbId>) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO pomodoro_progress (user_id) VALUES ($1)
             ON CONFLICT ((COALESCE(user_id, 0))) DO NOTHING",
        )
        .bind(owner)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Find the record for `owner` without creating it.
    pub async fn find_by_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<Option<PomodoroProgress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pomodoro_progress WHERE user_id IS NOT DISTINCT FROM $1");
        sqlx::query_as::<_, PomodoroProgress>(&query)
            .bind(owner)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Fetch-or-create the record for `owner` and lock it until the
    /// transaction ends.
    pub async fn get_or_create_for_update(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<PomodoroProgress, sqlx::Error> {
        Self::ensure(&mut *conn, owner).await?;
        let query = format!(
            "SELECT {COLUMNS} FROM pomodoro_progress
             WHERE user_id IS NOT DISTINCT FROM $1
             FOR UPDATE"
        );
        sqlx::query_as::<_, PomodoroProgress>(&query)
            .bind(owner)
            .fetch_one(&mut *conn)
            .await
    }

    /// Overwrite both counters, returning the updated row.
    pub async fn set_tally(
        conn: &mut PgConnection,
        id: DbId,
        tally: Tally,
    ) -> Result<PomodoroProgress, sqlx::Error> {
        let query = format!(
            "UPDATE pomodoro_progress
             SET pomodoro_points = $2, pomodoros_completed = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PomodoroProgress>(&query)
            .bind(id)
            .bind(tally.points)
            .bind(tally.sessions)
            .fetch_one(&mut *conn)
            .await
    }

    /// Zero the record for `owner`. Returns `true` if a record existed.
    pub async fn reset_by_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pomodoro_progress
             SET pomodoro_points = 0, pomodoros_completed = 0, updated_at = NOW()
             WHERE user_id IS NOT DISTINCT FROM $1",
        )
        .bind(owner)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
