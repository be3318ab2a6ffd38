//! Repository for the `pet_species` table.

use pomopet_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::species::{CreatePetSpecies, PetSpecies};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image, evolved_image";

/// Read access to the species catalog, plus inserts for seeding.
pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a species, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePetSpecies) -> Result<PetSpecies, sqlx::Error> {
        let query = format!(
            "INSERT INTO pet_species (name, image, evolved_image)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PetSpecies>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .bind(&input.evolved_image)
            .fetch_one(pool)
            .await
    }

    /// List the whole catalog ordered by id.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<PetSpecies>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pet_species ORDER BY id");
        sqlx::query_as::<_, PetSpecies>(&query)
            .fetch_all(&mut *conn)
            .await
    }

    /// All species ids ordered by id.
    pub async fn list_ids(conn: &mut PgConnection) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM pet_species ORDER BY id")
            .fetch_all(&mut *conn)
            .await
    }

    /// Find a species by id.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<PetSpecies>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pet_species WHERE id = $1");
        sqlx::query_as::<_, PetSpecies>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}
