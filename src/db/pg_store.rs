// src/db/pg_store.rs
// DOCUMENTATION: PostgreSQL implementation of the Store seam
// PURPOSE: Compose the repositories; own the two-table transactional writes

use crate::db::{with_transaction, PlaceRepository, Store, UserRepository};
use crate::errors::PlacesError;
use crate::models::{NewPlace, NewUser, Place, User};
use crate::services::PLACE_NOT_FOUND;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), PlacesError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, PlacesError> {
        UserRepository::list_all(&self.pool).await
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, PlacesError> {
        UserRepository::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PlacesError> {
        UserRepository::get_by_email(&self.pool, email).await
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, PlacesError> {
        UserRepository::create_user(&self.pool, &user).await
    }

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, PlacesError> {
        PlaceRepository::get_by_id(&self.pool, id).await
    }

    async fn places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, PlacesError> {
        PlaceRepository::list_by_creator(&self.pool, creator).await
    }

    async fn update_place_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Place>, PlacesError> {
        PlaceRepository::update_details(&self.pool, id, title, description).await
    }

    async fn insert_place_for_owner(&self, place: NewPlace) -> Result<Place, PlacesError> {
        let created = with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let created = PlaceRepository::insert(conn, &place).await?;
                UserRepository::add_place(conn, place.creator, created.id).await?;
                Ok(created)
            })
        })
        .await?;

        log::info!("Created place {} for user {}", created.id, created.creator);
        Ok(created)
    }

    async fn delete_place_for_owner(&self, place_id: Uuid, owner_id: Uuid) -> Result<(), PlacesError> {
        with_transaction(&self.pool, move |conn| {
            Box::pin(async move {
                let removed = PlaceRepository::delete(conn, place_id).await?;
                if removed == 0 {
                    return Err(PlacesError::NotFound(PLACE_NOT_FOUND.to_string()));
                }
                UserRepository::remove_place(conn, owner_id, place_id).await?;
                Ok(())
            })
        })
        .await?;

        log::info!("Deleted place {} of user {}", place_id, owner_id);
        Ok(())
    }
}
