use pomopet_core::error::CoreError;

/// Error returned by [`PetStore`](crate::PetStore) operations.
///
/// Domain rule violations keep their [`CoreError`] so the HTTP layer can map
/// them to 4xx responses; everything the database reports is passed through.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
