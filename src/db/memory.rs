// src/db/memory.rs
// DOCUMENTATION: In-memory Store used by unit and handler tests
// PURPOSE: Exercise service semantics without PostgreSQL, with failure injection

use crate::db::Store;
use crate::errors::PlacesError;
use crate::models::{NewPlace, NewUser, Place, User};
use crate::services::PLACE_NOT_FOUND;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    /// Insertion order doubles as creation order
    places: Vec<Place>,
}

/// Store backed by plain collections behind one lock
/// Transactional writes stage changes on a copy and swap it in on success
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_owner_link: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the second write of the next transactional operations fail
    pub fn fail_owner_link(&self, fail: bool) {
        self.fail_owner_link.store(fail, Ordering::SeqCst);
    }

    pub async fn seed_user(&self, name: &str, email: &str, password_hash: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            image: format!("uploads/images/{}.png", name.to_lowercase()),
            places: Vec::new(),
        };
        self.tables.write().await.users.insert(user.id, user.clone());
        user
    }

    pub async fn user(&self, id: Uuid) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }

    pub async fn place(&self, id: Uuid) -> Option<Place> {
        self.tables
            .read()
            .await
            .places
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn place_count(&self) -> usize {
        self.tables.read().await.places.len()
    }

    fn link_failure(&self) -> Result<(), PlacesError> {
        if self.fail_owner_link.load(Ordering::SeqCst) {
            return Err(PlacesError::Persistence("injected owner write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), PlacesError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, PlacesError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, PlacesError> {
        Ok(self.user(id).await)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PlacesError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, PlacesError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(PlacesError::EmailTaken);
        }
        let created = User {
            id: user.id,
            name: user.name,
            email: user.email,
            password: user.password_hash,
            image: user.image,
            places: Vec::new(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_place(&self, id: Uuid) -> Result<Option<Place>, PlacesError> {
        Ok(self.place(id).await)
    }

    async fn places_by_creator(&self, creator: Uuid) -> Result<Vec<Place>, PlacesError> {
        let tables = self.tables.read().await;
        Ok(tables
            .places
            .iter()
            .filter(|p| p.creator == creator)
            .cloned()
            .collect())
    }

    async fn update_place_details(
        &self,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Place>, PlacesError> {
        let mut tables = self.tables.write().await;
        Ok(tables.places.iter_mut().find(|p| p.id == id).map(|place| {
            place.title = title.to_string();
            place.description = description.to_string();
            place.clone()
        }))
    }

    async fn insert_place_for_owner(&self, place: NewPlace) -> Result<Place, PlacesError> {
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();

        let created = Place {
            id: place.id,
            title: place.title,
            description: place.description,
            address: place.address,
            location: place.location,
            image: place.image,
            creator: place.creator,
        };
        staged.places.push(created.clone());

        self.link_failure()?;
        let owner = staged
            .users
            .get_mut(&created.creator)
            .ok_or_else(|| PlacesError::Persistence("owner missing".to_string()))?;
        owner.places.push(created.id);

        *tables = staged;
        Ok(created)
    }

    async fn delete_place_for_owner(&self, place_id: Uuid, owner_id: Uuid) -> Result<(), PlacesError> {
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();

        let before = staged.places.len();
        staged.places.retain(|p| p.id != place_id);
        if staged.places.len() == before {
            return Err(PlacesError::NotFound(PLACE_NOT_FOUND.to_string()));
        }

        self.link_failure()?;
        let owner = staged
            .users
            .get_mut(&owner_id)
            .ok_or_else(|| PlacesError::Persistence("owner missing".to_string()))?;
        owner.places.retain(|id| *id != place_id);

        *tables = staged;
        Ok(())
    }
}
