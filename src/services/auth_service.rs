// src/services/auth_service.rs
// DOCUMENTATION: Password hashing and bearer token handling
// PURPOSE: Issue and verify signed, time-limited tokens; hash credentials

use crate::errors::PlacesError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens expire one hour after issuance
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Token and password service
/// DOCUMENTATION: Holds the signing secret; constructed once in main and
/// shared through actix `web::Data`
#[derive(Clone)]
pub struct AuthService {
    secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::seconds(TOKEN_TTL_SECONDS),
        }
    }

    /// Issue a token for a user, valid for one hour
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String, PlacesError> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    fn issue_token_at(
        &self,
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, PlacesError> {
        if self.secret.is_empty() {
            log::error!("Token signing requested without a signing key");
            return Err(PlacesError::Signing("signing key unavailable".to_string()));
        }

        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.token_ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Token generation failed: {}", e);
            PlacesError::Signing(e.to_string())
        })
    }

    /// Validate signature and expiry
    /// DOCUMENTATION: Every failure collapses into the same Authentication
    /// error; the underlying kind only reaches debug logs
    pub fn verify_token(&self, token: &str) -> Result<Claims, PlacesError> {
        if token.is_empty() || self.secret.is_empty() {
            return Err(PlacesError::Authentication);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            log::debug!("Rejected bearer token: {:?}", e.kind());
            PlacesError::Authentication
        })
    }

    /// Hash a password using Argon2id
    /// CPU bound; call from a blocking task
    pub fn hash_password(password: &str) -> Result<String, PlacesError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                log::error!("Password hashing failed: {}", e);
                PlacesError::Internal(format!("password hashing failed: {}", e))
            })
    }

    /// Verify a password against its stored hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, PlacesError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            log::error!("Stored password hash is malformed: {}", e);
            PlacesError::Internal(format!("invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
