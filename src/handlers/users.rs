// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for user listing, signup and login

use crate::config::Config;
use crate::errors::PlacesError;
use crate::handlers::upload::store_image;
use crate::models::{AuthResponse, LoginRequest, SignupRequest, UsersListResponse};
use crate::services::{Session, UserService};
use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse, Responder};

/// Multipart body of POST /api/users/signup
#[derive(MultipartForm)]
pub struct SignupForm {
    pub name: Text<String>,
    pub email: Text<String>,
    pub password: Text<String>,
    #[multipart(limit = "500KB")]
    pub image: TempFile,
}

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        status: "success",
        user_id: session.user.id,
        email: session.user.email,
        token: session.token,
    }
}

/// GET /api/users
pub async fn list_users(users: web::Data<UserService>) -> Result<impl Responder, PlacesError> {
    let list = users.list_users().await?;
    Ok(HttpResponse::Ok().json(UsersListResponse {
        status: "success",
        quantity: list.len(),
        users: list,
    }))
}

/// POST /api/users/signup
pub async fn signup(
    users: web::Data<UserService>,
    config: web::Data<Config>,
    MultipartForm(form): MultipartForm<SignupForm>,
) -> Result<impl Responder, PlacesError> {
    let image = store_image(form.image, &config.upload_dir).await?;
    let req = SignupRequest {
        name: form.name.into_inner(),
        email: form.email.into_inner(),
        password: form.password.into_inner(),
    };

    let session = users.signup(req, image).await?;
    log::info!("User {} signed up", session.user.id);
    Ok(HttpResponse::Created().json(auth_response(session)))
}

/// POST /api/users/login
/// A missing or unreadable body counts as missing credentials
pub async fn login(
    users: web::Data<UserService>,
    req: Option<web::Json<LoginRequest>>,
) -> Result<impl Responder, PlacesError> {
    let req = req.map(web::Json::into_inner).unwrap_or_default();
    let session = users.login(req).await?;
    Ok(HttpResponse::Ok().json(auth_response(session)))
}

/// Configure user routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .route("", web::get().to(list_users))
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login)),
    );
}
