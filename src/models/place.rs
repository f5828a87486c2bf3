// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines all serialization/deserialization models for API and database

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Geographic coordinates as returned by the geocoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Represents a complete place record
/// DOCUMENTATION: Maps to the places table; `location` is extracted from the
/// PostGIS POINT with ST_Y/ST_X in the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
    /// Path of the uploaded image, relative to the working directory
    pub image: String,
    /// Owning user
    pub creator: Uuid,
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Text fields of the multipart POST /api/places form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 5))]
    pub description: String,

    #[validate(length(min = 1))]
    pub address: String,
}

/// Request DTO for PATCH /api/places/{pid}
/// Only title and description are mutable
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 5))]
    pub description: String,
}

/// Fully resolved place ready for insertion
/// DOCUMENTATION: Built by PlaceService after validation, geocoding and owner lookup
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: Coordinates,
    pub image: String,
    pub creator: Uuid,
}

impl NewPlace {
    pub fn new(req: CreatePlaceRequest, location: Coordinates, image: String, creator: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            address: req.address,
            location,
            image,
            creator,
        }
    }
}

/// GET /api/places/{pid} response
#[derive(Debug, Serialize)]
pub struct PlaceEnvelope {
    pub status: &'static str,
    pub place: Place,
}

/// GET /api/places/user/{uid} response
#[derive(Debug, Serialize)]
pub struct PlacesListResponse {
    pub status: &'static str,
    pub quantity: usize,
    pub places: Vec<Place>,
}

/// POST /api/places response
#[derive(Debug, Serialize)]
pub struct CreatedPlaceResponse {
    pub status: &'static str,
    pub data: Place,
}

/// DELETE /api/places/{pid} response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: String,
}
