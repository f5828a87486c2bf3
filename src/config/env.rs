// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

/// Upper bound on geocoding attempts; backoff doubles per retry
pub const MAX_GEOCODER_ATTEMPTS: u32 = 5;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    /// Built from DB_USER/DB_PASSWORD/DB_HOST/DB_NAME when DATABASE_URL is absent
    pub database_url: String,

    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 5000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,

    /// Google Geocoding API key
    pub google_api_key: String,

    /// Upper bound for a single geocoding request, in seconds
    pub geocoder_timeout_secs: u64,

    /// Attempts per geocoding lookup, including the first one
    pub geocoder_max_attempts: u32,

    /// Directory where uploaded images are stored and served from
    pub upload_dir: String,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts()),

            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: parse_or("PORT", 5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            jwt_secret: env::var("JWT_PRIVATE_KEY").unwrap_or_default(),

            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),

            geocoder_timeout_secs: parse_or("GEOCODER_TIMEOUT_SECS", 8),

            geocoder_max_attempts: parse_or("GEOCODER_MAX_ATTEMPTS", 3),

            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/images".to_string()),

            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 20),

            db_connection_timeout: parse_or("DB_CONNECTION_TIMEOUT", 30),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("DATABASE_URL (or DB_USER/DB_PASSWORD/DB_HOST/DB_NAME) is required".to_string());
        }

        if self.jwt_secret.is_empty() {
            return Err("JWT_PRIVATE_KEY is required".to_string());
        }

        if self.geocoder_max_attempts == 0 || self.geocoder_max_attempts > MAX_GEOCODER_ATTEMPTS {
            return Err(format!(
                "GEOCODER_MAX_ATTEMPTS must be between 1 and {}",
                MAX_GEOCODER_ATTEMPTS
            ));
        }

        if self.google_api_key.is_empty() {
            log::warn!("GOOGLE_API_KEY not configured - place creation will fail to geocode");
        }

        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn database_url_from_parts() -> String {
    let user = env::var("DB_USER").unwrap_or_else(|_| "places".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "places".to_string());
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost:5432".to_string());
    let name = env::var("DB_NAME").unwrap_or_else(|_| "places".to_string());

    format!("postgresql://{}:{}@{}/{}", user, password, host, name)
}
