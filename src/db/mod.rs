// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Store seam used by the services, plus its PostgreSQL implementation

pub mod pg_store;
pub mod repository;
pub mod unit_of_work;
pub mod user_repository;

#[cfg(test)]
pub mod memory;

pub use pg_store::*;
pub use repository::*;
pub use unit_of_work::*;
pub use user_repository::*;

use crate::errors::PlacesError;
use crate::models::{NewPlace, NewUser, Place, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence seam for users and places
/// DOCUMENTATION: Services only talk to this trait. The two `*_for_owner`
/// methods are the transactional writes: the place row and the owner's
/// `places` set change together or not at all.
#[async_trait]
pub trait Store: Send + Sync {
    /// Connectivity check for the health endpoint
    async fn ping(&self) -> Result<(), PlacesError>;

    async fn list_users(&self) -> Result<Vec<User>, PlacesError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, PlacesError>;

    /// `email` must already be normalized
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PlacesError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, PlacesError>;

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, PlacesError>;

    async fn places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, PlacesError>;

    /// Returns None when the place does not exist
    async fn update_place_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Place>, PlacesError>;

    /// Insert the place and append it to its creator's set, atomically
    async fn insert_place_for_owner(&self, place: NewPlace) -> Result<Place, PlacesError>;

    /// Delete the place and remove it from the owner's set, atomically
    async fn delete_place_for_owner(&self, place_id: Uuid, owner_id: Uuid) -> Result<(), PlacesError>;
}
