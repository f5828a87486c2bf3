// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth_service;
pub mod cleanup;
pub mod geocoder;
pub mod place_service;
pub mod user_service;

pub use auth_service::*;
pub use cleanup::*;
pub use geocoder::*;
pub use place_service::*;
pub use user_service::*;
