// src/services/user_service.rs
// DOCUMENTATION: Business logic for users
// PURPOSE: Signup, login and listing on top of the credential store

use crate::db::Store;
use crate::errors::PlacesError;
use crate::models::{normalize_email, LoginRequest, NewUser, SignupRequest, User};
use crate::services::{AuthService, FileCleanup};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Successful signup or login
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

pub struct UserService {
    store: Arc<dyn Store>,
    auth: AuthService,
    cleanup: FileCleanup,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, auth: AuthService, cleanup: FileCleanup) -> Self {
        Self {
            store,
            auth,
            cleanup,
        }
    }

    /// All users; the password hash never leaves the model's serializer
    pub async fn list_users(&self) -> Result<Vec<User>, PlacesError> {
        self.store.list_users().await
    }

    /// Register a user with an already stored avatar image
    /// On failure the image is queued for removal
    pub async fn signup(&self, req: SignupRequest, image: String) -> Result<Session, PlacesError> {
        match self.try_signup(req, image.clone()).await {
            Ok(session) => Ok(session),
            Err(err) => {
                log::warn!("Signup failed, discarding upload {}: {}", image, err);
                self.cleanup.enqueue(image);
                Err(err)
            }
        }
    }

    async fn try_signup(&self, req: SignupRequest, image: String) -> Result<Session, PlacesError> {
        req.validate()?;
        let email = normalize_email(&req.email);

        if self.store.find_user_by_email(&email).await?.is_some() {
            log::warn!("Signup rejected, email already registered");
            return Err(PlacesError::EmailTaken);
        }

        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || AuthService::hash_password(&password))
            .await
            .map_err(|e| PlacesError::Internal(format!("hashing task failed: {}", e)))??;

        let user = self
            .store
            .insert_user(NewUser {
                id: Uuid::new_v4(),
                name: req.name,
                email,
                password_hash,
                image,
            })
            .await?;

        let token = self.auth.issue_token(user.id, &user.email)?;
        Ok(Session { user, token })
    }

    /// Authenticate with email and password
    /// DOCUMENTATION: Unknown email and wrong password yield the same error
    pub async fn login(&self, req: LoginRequest) -> Result<Session, PlacesError> {
        let (email, password) = match (req.email, req.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                (normalize_email(&email), password)
            }
            _ => return Err(PlacesError::MissingCredentials),
        };

        let user = match self.store.find_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                log::info!("Login failed: no account for submitted email");
                return Err(PlacesError::InvalidCredentials);
            }
        };

        let hash = user.password.clone();
        let valid = tokio::task::spawn_blocking(move || AuthService::verify_password(&password, &hash))
            .await
            .map_err(|e| PlacesError::Internal(format!("verification task failed: {}", e)))??;

        if !valid {
            log::info!("Login failed: wrong password for user {}", user.id);
            return Err(PlacesError::InvalidCredentials);
        }

        let token = self.auth.issue_token(user.id, &user.email)?;
        log::info!("User {} logged in", user.id);
        Ok(Session { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    const SECRET: &str = "test-secret";

    fn service(store: Arc<MemoryStore>) -> (UserService, tokio::sync::mpsc::UnboundedReceiver<std::path::PathBuf>) {
        let (cleanup, cleaned) = FileCleanup::channel();
        (UserService::new(store, AuthService::new(SECRET), cleanup), cleaned)
    }

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            name: "Max".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_issues_token_for_new_user() {
        let store = Arc::new(MemoryStore::new());
        let (users, _cleaned) = service(store.clone());

        let session = users
            .signup(signup_request("Max@Example.com"), "uploads/images/max.png".into())
            .await
            .unwrap();

        assert_eq!(session.user.email, "max@example.com");
        assert_ne!(session.user.password, "secret1");
        let claims = AuthService::new(SECRET).verify_token(&session.token).unwrap();
        assert_eq!(claims.user_id, session.user.id);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let store = Arc::new(MemoryStore::new());
        store.seed_user("Max", "max@example.com", "hash").await;
        let (users, mut cleaned) = service(store);

        let err = users
            .signup(signup_request("max@example.com"), "uploads/images/dup.png".into())
            .await
            .unwrap_err();

        assert!(matches!(err, PlacesError::EmailTaken));
        assert_eq!(cleaned.try_recv().unwrap(), std::path::PathBuf::from("uploads/images/dup.png"));
    }

    #[tokio::test]
    async fn test_login_returns_token_for_stored_user() {
        let store = Arc::new(MemoryStore::new());
        let (users, _cleaned) = service(store);
        let created = users
            .signup(signup_request("max@example.com"), "uploads/images/max.png".into())
            .await
            .unwrap();

        let session = users
            .login(login_request("max@example.com", "secret1"))
            .await
            .unwrap();

        let claims = AuthService::new(SECRET).verify_token(&session.token).unwrap();
        assert_eq!(claims.user_id, created.user.id);
    }

    #[tokio::test]
    async fn test_login_failures_do_not_reveal_email_existence() {
        let store = Arc::new(MemoryStore::new());
        let (users, _cleaned) = service(store);
        users
            .signup(signup_request("max@example.com"), "uploads/images/max.png".into())
            .await
            .unwrap();

        let wrong_password = users
            .login(login_request("max@example.com", "nope-nope"))
            .await
            .unwrap_err();
        let unknown_email = users
            .login(login_request("ghost@example.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, PlacesError::InvalidCredentials));
        assert!(matches!(unknown_email, PlacesError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let store = Arc::new(MemoryStore::new());
        let (users, _cleaned) = service(store);

        let err = users
            .login(LoginRequest {
                email: Some("max@example.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PlacesError::MissingCredentials));
    }
}
