// src/models/user.rs
// DOCUMENTATION: User records and auth DTOs
// PURPOSE: Credential store model plus signup/login payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a complete user record from the database
/// DOCUMENTATION: `password` holds the argon2 hash and is never serialized
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub image: String,
    /// Ids of the places this user owns
    pub places: Vec<Uuid>,
}

/// Signup form fields (multipart, image handled separately)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,
}

/// Login payload
/// Fields are optional so a missing one maps to a 400 instead of a parse error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Insert payload for the users table
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
}

/// Signup/login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub status: &'static str,
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

/// GET /api/users response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub status: &'static str,
    pub quantity: usize,
    pub users: Vec<User>,
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
