// src/db/user_repository.rs
// DOCUMENTATION: User database operations
// PURPOSE: Credential store queries and owned-place membership updates

use crate::errors::PlacesError;
use crate::models::{NewUser, User};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, PlacesError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC")
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, PlacesError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, PlacesError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Insert a new user with an empty place set
    /// DOCUMENTATION: A unique violation on email maps to EmailTaken, which
    /// covers the race between the service's existence check and this insert
    pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<User, PlacesError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password, image, places, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, '{}', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.image)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if duplicate {
                log::warn!("Signup rejected, email already registered");
                PlacesError::EmailTaken
            } else {
                PlacesError::from(e)
            }
        })?;

        log::info!("Created user with id: {}", created.id);
        Ok(created)
    }

    /// Append a place id to the owner's set inside an open transaction
    pub async fn add_place(
        conn: &mut PgConnection,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<(), PlacesError> {
        let rows = sqlx::query(
            r#"
            UPDATE users
            SET places = array_append(places, $1),
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(place_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if rows == 0 {
            log::error!("Owner {} vanished while linking place {}", user_id, place_id);
            return Err(PlacesError::Persistence(format!(
                "owner {} not found while linking place",
                user_id
            )));
        }
        Ok(())
    }

    /// Remove a place id from the owner's set inside an open transaction
    pub async fn remove_place(
        conn: &mut PgConnection,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<(), PlacesError> {
        let rows = sqlx::query(
            r#"
            UPDATE users
            SET places = array_remove(places, $1),
                updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(place_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if rows == 0 {
            log::error!("Owner {} vanished while unlinking place {}", user_id, place_id);
            return Err(PlacesError::Persistence(format!(
                "owner {} not found while unlinking place",
                user_id
            )));
        }
        Ok(())
    }
}
