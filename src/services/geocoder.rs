// src/services/geocoder.rs
// DOCUMENTATION: Google Geocoding API client
// PURPOSE: Translate a free-text address into coordinates

use crate::errors::PlacesError;
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Address lookup used by place creation
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinates, PlacesError>;
}

/// Tunables for the HTTP geocoder
#[derive(Debug, Clone)]
pub struct GeocoderSettings {
    /// Upper bound for one HTTP request
    pub timeout: Duration,
    /// Attempts per lookup, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry
    pub backoff: Duration,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Google Geocoding API client
/// DOCUMENTATION: Handles authentication, timeouts and bounded retries
pub struct GoogleGeocoder {
    /// HTTP client for making requests
    client: Client,
    /// Google API key
    api_key: String,
    /// Base URL for the Geocoding API
    base_url: String,
    settings: GeocoderSettings,
}

/// Response from the Geocoding API
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: Coordinates,
}

/// Outcome of a single request
#[derive(Debug)]
enum Attempt {
    Done(Result<Coordinates, PlacesError>),
    /// Worth retrying after a backoff
    Transient(PlacesError),
}

impl GoogleGeocoder {
    pub const DEFAULT_BASE_URL: &'static str = "https://maps.googleapis.com/maps/api/geocode";

    pub fn new(api_key: String, settings: GeocoderSettings) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string(), settings)
    }

    pub fn with_base_url(
        api_key: String,
        base_url: String,
        settings: GeocoderSettings,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| PlacesError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            settings,
        })
    }

    async fn attempt(&self, address: &str) -> Attempt {
        let url = format!("{}/json", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::error!("Geocoding request failed: {}", e);
                let err = PlacesError::GeocodeProvider(format!("request failed: {}", e));
                return if e.is_timeout() || e.is_connect() {
                    Attempt::Transient(err)
                } else {
                    Attempt::Done(Err(err))
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::error!("Geocoding API returned HTTP {}", status);
            let err = PlacesError::GeocodeProvider(format!("HTTP {}", status));
            return if status.is_server_error() {
                Attempt::Transient(err)
            } else {
                Attempt::Done(Err(err))
            };
        }

        match response.text().await {
            Ok(body) => interpret_body(&body),
            Err(e) => {
                log::error!("Failed to read geocoding response: {}", e);
                Attempt::Transient(PlacesError::GeocodeProvider(format!("read failed: {}", e)))
            }
        }
    }
}

/// Map a provider response body to coordinates or a domain error
fn interpret_body(body: &str) -> Attempt {
    if body.trim().is_empty() {
        log::warn!("Geocoding API returned an empty body");
        return Attempt::Done(Err(PlacesError::GeocodeNotFound));
    }

    let parsed: GeocodeResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Failed to parse geocoding response: {}", e);
            return Attempt::Done(Err(PlacesError::GeocodeProvider(format!(
                "parse error: {}",
                e
            ))));
        }
    };

    match parsed.status.as_str() {
        "OK" => match parsed.results.into_iter().next() {
            Some(result) => Attempt::Done(Ok(result.geometry.location)),
            None => Attempt::Done(Err(PlacesError::GeocodeNotFound)),
        },
        "ZERO_RESULTS" => Attempt::Done(Err(PlacesError::GeocodeNotFound)),
        "UNKNOWN_ERROR" => Attempt::Transient(PlacesError::GeocodeProvider(
            "provider reported UNKNOWN_ERROR".to_string(),
        )),
        other => {
            let msg = parsed
                .error_message
                .unwrap_or_else(|| format!("status {}", other));
            log::error!("Geocoding API rejected request: {}", msg);
            Attempt::Done(Err(PlacesError::GeocodeProvider(msg)))
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinates, PlacesError> {
        log::debug!("Geocoding address: {}", address);

        let mut attempt = 1;
        loop {
            match self.attempt(address).await {
                Attempt::Done(result) => return result,
                Attempt::Transient(err) if attempt < self.settings.max_attempts => {
                    let delay = self.settings.backoff * 2u32.saturating_pow(attempt - 1);
                    log::warn!(
                        "Geocoding attempt {}/{} failed ({}), retrying in {:?}",
                        attempt,
                        self.settings.max_attempts,
                        err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Attempt::Transient(err) => return Err(err),
            }
        }
    }
}
