// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Message returned for every 500-class failure
/// Driver and provider details stay in the logs
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later.";

/// Application-specific error types
/// DOCUMENTATION: Every service returns one of these variants
/// Each variant maps to an HTTP status code; the body is always `{ "message": ... }`
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Invalid inputs passed, please check your data: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidUpload(String),

    #[error("Could not create a user, email already exists.")]
    EmailTaken,

    #[error("Please provide email and password!")]
    MissingCredentials,

    #[error("Incorrect email or password!")]
    InvalidCredentials,

    #[error("Authentication failed!")]
    Authentication,

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Could not find this route.")]
    RouteNotFound,

    #[error("Could not find location for the specified address.")]
    GeocodeNotFound,

    #[error("Geocoding provider error: {0}")]
    GeocodeProvider(String),

    #[error("Database error: {0}")]
    Persistence(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlacesError {
    /// Message exposed to API consumers
    /// Server-side failures never leak their details
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<sqlx::Error> for PlacesError {
    fn from(err: sqlx::Error) -> Self {
        log::error!("Database operation failed: {}", err);
        PlacesError::Persistence(err.to_string())
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        log::warn!("Rejected invalid input for fields: {:?}", fields);
        PlacesError::Validation(fields.join(", "))
    }
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and the JSON envelope
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.public_message()
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::Validation(_)
            | PlacesError::InvalidUpload(_)
            | PlacesError::EmailTaken
            | PlacesError::GeocodeNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            PlacesError::MissingCredentials => StatusCode::BAD_REQUEST,
            PlacesError::InvalidCredentials | PlacesError::Authorization(_) => {
                StatusCode::UNAUTHORIZED
            }
            PlacesError::Authentication => StatusCode::FORBIDDEN,
            PlacesError::NotFound(_) | PlacesError::RouteNotFound => StatusCode::NOT_FOUND,
            PlacesError::GeocodeProvider(_)
            | PlacesError::Persistence(_)
            | PlacesError::Signing(_)
            | PlacesError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PlacesError::GeocodeNotFound.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PlacesError::Authorization("nope".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(PlacesError::Authentication.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            PlacesError::Persistence("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let err = PlacesError::Persistence("duplicate key value violates constraint".into());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["message"], GENERIC_FAILURE_MESSAGE);
    }

    #[actix_web::test]
    async fn test_client_errors_keep_message() {
        let err = PlacesError::NotFound("Could not find a place with specified id.".into());
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["message"], "Could not find a place with specified id.");
    }
}
