// src/db/repository.rs
// DOCUMENTATION: Database access layer for places
// PURPOSE: All SQL touching the places table

use crate::errors::PlacesError;
use crate::models::{Coordinates, NewPlace, Place};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

/// Internal struct for mapping database rows to Place struct
/// DOCUMENTATION: Handles PostGIS POINT extraction via ST_X() and ST_Y()
#[derive(Debug, FromRow)]
struct PlaceRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub longitude: f64, // From ST_X(location)
    pub latitude: f64,  // From ST_Y(location)
    pub image: String,
    pub creator: Uuid,
}

impl PlaceRow {
    fn into_place(self) -> Place {
        Place {
            id: self.id,
            title: self.title,
            description: self.description,
            address: self.address,
            location: Coordinates {
                lat: self.latitude,
                lng: self.longitude,
            },
            image: self.image,
            creator: self.creator,
        }
    }
}

const PLACE_COLUMNS: &str = r#"
    id, title, description, address,
    ST_X(location) AS longitude, ST_Y(location) AS latitude,
    image, creator
"#;

/// PlaceRepository: All database operations for places
/// DOCUMENTATION: Reads go through the pool; writes that belong to a unit of
/// work take the transaction's connection
pub struct PlaceRepository;

impl PlaceRepository {
    /// Retrieve place by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Place>, PlacesError> {
        let sql = format!("SELECT {} FROM places WHERE id = $1", PLACE_COLUMNS);

        let row = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(PlaceRow::into_place))
    }

    /// All places owned by a user, oldest first
    pub async fn list_by_creator(pool: &PgPool, creator: Uuid) -> Result<Vec<Place>, PlacesError> {
        let sql = format!(
            "SELECT {} FROM places WHERE creator = $1 ORDER BY created_at ASC",
            PLACE_COLUMNS
        );

        let rows = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(creator)
            .fetch_all(pool)
            .await?;

        log::debug!("Found {} places for user {}", rows.len(), creator);
        Ok(rows.into_iter().map(PlaceRow::into_place).collect())
    }

    /// Insert a place inside an open transaction
    pub async fn insert(conn: &mut PgConnection, place: &NewPlace) -> Result<Place, PlacesError> {
        let sql = format!(
            r#"
            INSERT INTO places (
                id, title, description, address, location, image, creator,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4,
                ST_SetSRID(ST_MakePoint($5, $6), 4326),
                $7, $8, NOW(), NOW()
            )
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let row = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(place.id) // $1
            .bind(&place.title) // $2
            .bind(&place.description) // $3
            .bind(&place.address) // $4
            .bind(place.location.lng) // $5 - longitude
            .bind(place.location.lat) // $6 - latitude
            .bind(&place.image) // $7
            .bind(place.creator) // $8
            .fetch_one(&mut *conn)
            .await?;

        Ok(row.into_place())
    }

    /// Update title and description
    /// Single-row write, no transaction needed
    pub async fn update_details(
        pool: &PgPool,
        id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Option<Place>, PlacesError> {
        let sql = format!(
            r#"
            UPDATE places
            SET title = $1,
                description = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING {}
            "#,
            PLACE_COLUMNS
        );

        let row = sqlx::query_as::<_, PlaceRow>(&sql)
            .bind(title)
            .bind(description)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        if row.is_some() {
            log::info!("Updated place: {}", id);
        }
        Ok(row.map(PlaceRow::into_place))
    }

    /// Hard delete inside an open transaction
    /// Returns the number of removed rows
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<u64, PlacesError> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
