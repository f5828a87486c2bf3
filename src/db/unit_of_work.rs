// src/db/unit_of_work.rs
// DOCUMENTATION: Scoped transactional unit of work
// PURPOSE: One place that owns begin/commit/rollback for multi-table writes

use crate::errors::PlacesError;
use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};

/// Run `work` inside a single database transaction
/// DOCUMENTATION: Commits when `work` returns Ok, rolls back on Err.
/// The closure receives the transaction's connection; every statement it
/// runs through that connection is part of the same unit.
/// A dropped future (client gone mid-request) drops the transaction, which
/// sqlx rolls back as well.
///
/// Closures must own the data they use:
/// ```ignore
/// with_transaction(&pool, move |conn| Box::pin(async move {
///     PlaceRepository::insert(conn, &new_place).await?;
///     UserRepository::add_place(conn, new_place.creator, new_place.id).await?;
///     Ok(())
/// })).await?;
/// ```
pub async fn with_transaction<T, F>(pool: &PgPool, work: F) -> Result<T, PlacesError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, PlacesError>> + Send,
{
    let mut tx = pool.begin().await.map_err(|e| {
        log::error!("Failed to begin transaction: {}", e);
        PlacesError::Persistence(e.to_string())
    })?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(|e| {
                log::error!("Failed to commit transaction: {}", e);
                PlacesError::Persistence(e.to_string())
            })?;
            Ok(value)
        }
        Err(err) => {
            log::warn!("Rolling back transaction: {}", err);
            if let Err(rollback_err) = tx.rollback().await {
                log::error!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
