// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Ownership checks and atomic place/owner writes between handlers and the store

use crate::db::Store;
use crate::errors::PlacesError;
use crate::models::{CreatePlaceRequest, NewPlace, Place, UpdatePlaceRequest};
use crate::services::{FileCleanup, Geocoder};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Reported for any place id that matches no record
pub const PLACE_NOT_FOUND: &str = "Could not find a place with specified id.";

pub const USER_PLACES_NOT_FOUND: &str = "Could not find places for specified user id.";

pub struct PlaceService {
    store: Arc<dyn Store>,
    geocoder: Arc<dyn Geocoder>,
    cleanup: FileCleanup,
}

impl PlaceService {
    pub fn new(store: Arc<dyn Store>, geocoder: Arc<dyn Geocoder>, cleanup: FileCleanup) -> Self {
        Self {
            store,
            geocoder,
            cleanup,
        }
    }

    /// Get a place by ID
    pub async fn get_place(&self, place_id: Uuid) -> Result<Place, PlacesError> {
        self.store
            .find_place(place_id)
            .await?
            .ok_or_else(|| PlacesError::NotFound(PLACE_NOT_FOUND.to_string()))
    }

    /// All places owned by a user
    /// An empty result is reported as not found
    pub async fn places_by_user(&self, user_id: Uuid) -> Result<Vec<Place>, PlacesError> {
        let places = self.store.places_by_creator(user_id).await?;

        if places.is_empty() {
            return Err(PlacesError::NotFound(USER_PLACES_NOT_FOUND.to_string()));
        }
        Ok(places)
    }

    /// Create a place owned by `caller`
    /// DOCUMENTATION: `image` is the already stored upload. If creation fails
    /// at any step the image is queued for removal so it does not linger.
    pub async fn create_place(
        &self,
        caller: Uuid,
        req: CreatePlaceRequest,
        image: String,
    ) -> Result<Place, PlacesError> {
        match self.try_create_place(caller, req, image.clone()).await {
            Ok(place) => Ok(place),
            Err(err) => {
                log::warn!("Place creation failed, discarding upload {}: {}", image, err);
                self.cleanup.enqueue(image);
                Err(err)
            }
        }
    }

    async fn try_create_place(
        &self,
        caller: Uuid,
        req: CreatePlaceRequest,
        image: String,
    ) -> Result<Place, PlacesError> {
        req.validate()?;

        let location = self.geocoder.resolve(&req.address).await?;

        let owner = self.store.find_user(caller).await?.ok_or_else(|| {
            log::warn!("Token holder {} no longer exists", caller);
            PlacesError::NotFound("Could not find a user for provided id.".to_string())
        })?;

        let new_place = NewPlace::new(req, location, image, owner.id);
        self.store
            .insert_place_for_owner(new_place)
            .await
            .map_err(|e| match e {
                PlacesError::Persistence(_) => e,
                other => PlacesError::Persistence(other.to_string()),
            })
    }

    /// Update title and description of a place owned by `caller`
    pub async fn update_place(
        &self,
        caller: Uuid,
        place_id: Uuid,
        req: UpdatePlaceRequest,
    ) -> Result<Place, PlacesError> {
        req.validate()?;

        let place = self.get_place(place_id).await?;
        if place.creator != caller {
            log::warn!("User {} tried to edit place {} owned by {}", caller, place_id, place.creator);
            return Err(PlacesError::Authorization(
                "You are not allowed to edit this place.".to_string(),
            ));
        }

        self.store
            .update_place_details(place_id, &req.title, &req.description)
            .await?
            .ok_or_else(|| PlacesError::NotFound(PLACE_NOT_FOUND.to_string()))
    }

    /// Delete a place owned by `caller`
    /// DOCUMENTATION: The place row and the owner's membership are removed in
    /// one transaction; the image is queued for removal only after commit
    pub async fn delete_place(&self, caller: Uuid, place_id: Uuid) -> Result<(), PlacesError> {
        let place = self.get_place(place_id).await?;

        let owner = self.store.find_user(place.creator).await?.ok_or_else(|| {
            log::error!("Place {} references missing user {}", place_id, place.creator);
            PlacesError::NotFound("Could not find the owner of this place.".to_string())
        })?;

        if owner.id != caller {
            log::warn!("User {} tried to delete place {} owned by {}", caller, place_id, owner.id);
            return Err(PlacesError::Authorization(
                "You are not allowed to delete this place.".to_string(),
            ));
        }

        let image = place.image;
        self.store.delete_place_for_owner(place_id, owner.id).await?;

        self.cleanup.enqueue(image);
        Ok(())
    }
}
