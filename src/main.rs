// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, services and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

#[cfg(test)]
mod test_support;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use db::{PgStore, Store};
use dotenv::dotenv;
use handlers::AppState;
use services::{FileCleanup, GeocoderSettings, GoogleGeocoder};
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    log::info!("Starting places-api...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool and run migrations
    let pool = config::init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    // 5. Outbound geocoder
    let geocoder = GoogleGeocoder::new(
        config.google_api_key.clone(),
        GeocoderSettings {
            timeout: Duration::from_secs(config.geocoder_timeout_secs),
            max_attempts: config.geocoder_max_attempts,
            ..GeocoderSettings::default()
        },
    )
    .context("Failed to build geocoder client")?;

    // 6. Upload storage and its cleanup worker
    std::fs::create_dir_all(&config.upload_dir)
        .with_context(|| format!("Cannot create upload directory {}", config.upload_dir))?;
    let cleanup = FileCleanup::spawn();

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let upload_dir = config.upload_dir.clone();
    let state = AppState::new(config, store, Arc::new(geocoder), cleanup);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            // Middleware
            .wrap(handlers::cors_headers())
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Static uploads
            .service(Files::new("/uploads/images", upload_dir.clone()))
            // Application state and routes
            .configure(move |cfg| state.configure(cfg))
            .default_service(web::to(handlers::not_found))
    })
    .bind(&server_addr)
    .with_context(|| format!("Cannot bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
