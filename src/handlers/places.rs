// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::Config;
use crate::errors::PlacesError;
use crate::handlers::auth::{AuthenticatedUser, RequireAuth};
use crate::handlers::upload::store_image;
use crate::models::{
    CreatePlaceRequest, CreatedPlaceResponse, MessageResponse, PlaceEnvelope, PlacesListResponse,
    UpdatePlaceRequest,
};
use crate::services::{PlaceService, PLACE_NOT_FOUND, USER_PLACES_NOT_FOUND};
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{guard, web, HttpResponse, Responder};
use uuid::Uuid;

/// Multipart body of POST /api/places
#[derive(MultipartForm)]
pub struct CreatePlaceForm {
    pub title: Text<String>,
    pub description: Text<String>,
    pub address: Text<String>,
    #[multipart(limit = "500KB")]
    pub image: TempFile,
}

/// Ids that are not UUIDs can never match a record
pub(crate) fn parse_id(raw: &str, missing: &str) -> Result<Uuid, PlacesError> {
    Uuid::parse_str(raw).map_err(|_| PlacesError::NotFound(missing.to_string()))
}

/// GET /api/places/{pid}
pub async fn get_place(
    places: web::Data<PlaceService>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let place_id = parse_id(&path, PLACE_NOT_FOUND)?;
    let place = places.get_place(place_id).await?;
    Ok(HttpResponse::Ok().json(PlaceEnvelope {
        status: "success",
        place,
    }))
}

/// GET /api/places/user/{uid}
pub async fn get_places_by_user_id(
    places: web::Data<PlaceService>,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let user_id = parse_id(&path, USER_PLACES_NOT_FOUND)?;
    let list = places.places_by_user(user_id).await?;
    Ok(HttpResponse::Ok().json(PlacesListResponse {
        status: "success",
        quantity: list.len(),
        places: list,
    }))
}

/// POST /api/places
/// Create a place owned by the caller
pub async fn create_place(
    places: web::Data<PlaceService>,
    config: web::Data<Config>,
    caller: AuthenticatedUser,
    MultipartForm(form): MultipartForm<CreatePlaceForm>,
) -> Result<impl Responder, PlacesError> {
    let image = store_image(form.image, &config.upload_dir).await?;
    let req = CreatePlaceRequest {
        title: form.title.into_inner(),
        description: form.description.into_inner(),
        address: form.address.into_inner(),
    };

    let place = places.create_place(caller.user_id, req, image).await?;
    log::info!(
        "User {} <{}> created place {}",
        caller.user_id,
        caller.email,
        place.id
    );
    Ok(HttpResponse::Created().json(CreatedPlaceResponse {
        status: "success",
        data: place,
    }))
}

/// PATCH /api/places/{pid}
pub async fn update_place(
    places: web::Data<PlaceService>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<UpdatePlaceRequest>,
) -> Result<impl Responder, PlacesError> {
    let place_id = parse_id(&path, PLACE_NOT_FOUND)?;
    let place = places
        .update_place(caller.user_id, place_id, req.into_inner())
        .await?;
    log::info!("User {} <{}> updated place {}", caller.user_id, caller.email, place_id);
    Ok(HttpResponse::Created().json(PlaceEnvelope {
        status: "success",
        place,
    }))
}

/// DELETE /api/places/{pid}
pub async fn delete_place(
    places: web::Data<PlaceService>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<impl Responder, PlacesError> {
    let place_id = parse_id(&path, PLACE_NOT_FOUND)?;
    places.delete_place(caller.user_id, place_id).await?;
    log::info!("User {} <{}> deleted place {}", caller.user_id, caller.email, place_id);
    Ok(HttpResponse::Ok().json(MessageResponse {
        status: "success",
        message: "Place deleted successfully!".to_string(),
    }))
}

/// Configure place routes
/// Reads are public; writes go through `RequireAuth`
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/places")
            .service(
                web::resource("/user/{uid}").route(web::get().to(get_places_by_user_id)),
            )
            .service(
                web::resource("")
                    .wrap(RequireAuth)
                    .route(web::post().to(create_place)),
            )
            .service(
                web::resource("/{pid}")
                    .guard(guard::Get())
                    .route(web::get().to(get_place)),
            )
            .service(
                web::resource("/{pid}")
                    .wrap(RequireAuth)
                    .route(web::patch().to(update_place))
                    .route(web::delete().to(delete_place)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "missing").unwrap(), id);
        match parse_id("p1", "missing") {
            Err(PlacesError::NotFound(msg)) => assert_eq!(msg, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
