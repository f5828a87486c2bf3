// src/test_support.rs
// DOCUMENTATION: Shared fixtures for unit and handler tests

use crate::errors::PlacesError;
use crate::models::Coordinates;
use crate::services::Geocoder;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Geocoder that knows one address shape and one unknown address
#[derive(Default)]
pub struct StubGeocoder {
    pub calls: AtomicUsize,
}

impl StubGeocoder {
    pub const EMPIRE_STATE: Coordinates = Coordinates {
        lat: 40.7484405,
        lng: -73.9878584,
    };
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if address.starts_with("zzzz") {
            return Err(PlacesError::GeocodeNotFound);
        }
        Ok(Self::EMPIRE_STATE)
    }
}
