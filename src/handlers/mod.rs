// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Shared application state, route table and HTTP plumbing

pub mod auth;
pub mod health;
pub mod places;
pub mod upload;
pub mod users;

pub use health::config as health_config;
pub use places::config as places_config;
pub use users::config as users_config;

use crate::config::Config;
use crate::db::Store;
use crate::errors::PlacesError;
use crate::services::{AuthService, FileCleanup, Geocoder, PlaceService, UserService};
use actix_multipart::form::MultipartFormConfig;
use actix_web::middleware::DefaultHeaders;
use actix_web::{guard, web, HttpResponse};
use std::sync::Arc;

/// Everything a request handler may depend on
/// DOCUMENTATION: Built once at startup and cloned into every worker. Each
/// field is registered as its own `web::Data` so handlers extract only what
/// they use.
#[derive(Clone)]
pub struct AppState {
    pub config: web::Data<Config>,
    pub store: web::Data<dyn Store>,
    pub auth: web::Data<AuthService>,
    pub places: web::Data<PlaceService>,
    pub users: web::Data<UserService>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn Store>,
        geocoder: Arc<dyn Geocoder>,
        cleanup: FileCleanup,
    ) -> Self {
        let auth = AuthService::new(config.jwt_secret.clone());
        let places = PlaceService::new(store.clone(), geocoder, cleanup.clone());
        let users = UserService::new(store.clone(), auth.clone(), cleanup);

        Self {
            config: web::Data::new(config),
            store: web::Data::from(store),
            auth: web::Data::new(auth),
            places: web::Data::new(places),
            users: web::Data::new(users),
        }
    }

    /// Register state, extractor settings and all API routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.config.clone())
            .app_data(self.store.clone())
            .app_data(self.auth.clone())
            .app_data(self.places.clone())
            .app_data(self.users.clone())
            .app_data(json_config())
            .app_data(multipart_config());

        cfg.service(
            web::resource("/{tail:.*}")
                .guard(guard::Options())
                .to(preflight),
        );
        health_config(cfg);
        places_config(cfg);
        users_config(cfg);
    }
}

/// CORS headers attached to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "Origin, X-Requested-With, Content-Type, Accept, Authorization",
        ))
        .add((
            "Access-Control-Allow-Methods",
            "GET, POST, PATCH, DELETE, OPTIONS",
        ))
}

/// Malformed JSON bodies are reported as invalid input
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected JSON body: {}", err);
        PlacesError::Validation(err.to_string()).into()
    })
}

/// Oversized or malformed multipart bodies are reported as invalid uploads
fn multipart_config() -> MultipartFormConfig {
    MultipartFormConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected multipart body: {}", err);
        PlacesError::InvalidUpload(err.to_string()).into()
    })
}

/// Answers every CORS preflight
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Fallback for unknown routes
pub async fn not_found() -> Result<HttpResponse, PlacesError> {
    Err(PlacesError::RouteNotFound)
}
