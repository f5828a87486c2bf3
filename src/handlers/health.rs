// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Report service and database status

use crate::db::Store;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check(store: web::Data<dyn Store>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "service": "places-api",
            "version": env!("CARGO_PKG_VERSION"),
            "database": "up"
        })),
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "service": "places-api",
                "version": env!("CARGO_PKG_VERSION"),
                "database": "down"
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
