//! Repository for the `egg_pets` table.
//!
//! Owner scoping uses `user_id IS NOT DISTINCT FROM $n` so that the
//! anonymous (`NULL`) owner behaves like any other key.

use std::collections::HashSet;

use pomopet_core::evolution::Stage;
use pomopet_core::types::DbId;
use sqlx::PgConnection;

use crate::models::pet::{EggPet, NewEggPet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, species_id, stage, nickname, is_active, created_at";

/// Provides CRUD and locking operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet for `owner`, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        owner: Option<DbId>,
        input: &NewEggPet,
    ) -> Result<EggPet, sqlx::Error> {
        let query = format!(
            "INSERT INTO egg_pets (user_id, species_id, stage, nickname, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EggPet>(&query)
            .bind(owner)
            .bind(input.species_id)
            .bind(input.stage.as_str())
            .bind(&input.nickname)
            .bind(input.is_active)
            .fetch_one(&mut *conn)
            .await
    }

    /// List an owner's pets ordered by id, optionally filtered on `is_active`.
    pub async fn list_by_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
        is_active: Option<bool>,
    ) -> Result<Vec<EggPet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM egg_pets
             WHERE user_id IS NOT DISTINCT FROM $1
               AND ($2::BOOLEAN IS NULL OR is_active = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, EggPet>(&query)
            .bind(owner)
            .bind(is_active)
            .fetch_all(&mut *conn)
            .await
    }

    /// Find a pet by id without locking it.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<EggPet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM egg_pets WHERE id = $1");
        sqlx::query_as::<_, EggPet>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Fetch a pet and lock its row until the transaction ends.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<EggPet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM egg_pets WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, EggPet>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Take a transaction-scoped advisory lock on `owner`. Serializes
    /// writers that may find no pet rows to lock.
    pub async fn lock_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(owner.unwrap_or(0))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Lock every pet of an owner, in id order.
    pub async fn lock_owner_pets(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "SELECT id FROM egg_pets
             WHERE user_id IS NOT DISTINCT FROM $1
             ORDER BY id
             FOR UPDATE",
        )
        .bind(owner)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Distinct species ids bound to an owner's pets.
    pub async fn owned_species_ids(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<HashSet<DbId>, sqlx::Error> {
        let ids = sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT species_id FROM egg_pets
             WHERE user_id IS NOT DISTINCT FROM $1 AND species_id IS NOT NULL",
        )
        .bind(owner)
        .fetch_all(&mut *conn)
        .await?;
        Ok(ids.into_iter().collect())
    }

    /// Clear `is_active` on every pet of an owner.
    pub async fn deactivate_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE egg_pets SET is_active = FALSE, updated_at = NOW()
             WHERE user_id IS NOT DISTINCT FROM $1 AND is_active",
        )
        .bind(owner)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark a single pet active, returning the updated row.
    pub async fn set_active(conn: &mut PgConnection, id: DbId) -> Result<EggPet, sqlx::Error> {
        let query = format!(
            "UPDATE egg_pets SET is_active = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EggPet>(&query)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Write stage and species together, returning the updated row.
    pub async fn set_stage_and_species(
        conn: &mut PgConnection,
        id: DbId,
        stage: Stage,
        species_id: Option<DbId>,
    ) -> Result<EggPet, sqlx::Error> {
        let query = format!(
            "UPDATE egg_pets SET stage = $2, species_id = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EggPet>(&query)
            .bind(id)
            .bind(stage.as_str())
            .bind(species_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Update the nickname, returning the updated row.
    pub async fn set_nickname(
        conn: &mut PgConnection,
        id: DbId,
        nickname: &str,
    ) -> Result<EggPet, sqlx::Error> {
        let query = format!(
            "UPDATE egg_pets SET nickname = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EggPet>(&query)
            .bind(id)
            .bind(nickname)
            .fetch_one(&mut *conn)
            .await
    }

    /// Permanently delete every pet of an owner. Returns the number removed.
    pub async fn delete_by_owner(
        conn: &mut PgConnection,
        owner: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM egg_pets WHERE user_id IS NOT DISTINCT FROM $1")
            .bind(owner)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
