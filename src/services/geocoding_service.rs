//! Place name to coordinates, trying each configured provider in order.
//!
//! Providers without a key are left out of the chain. A provider failure is
//! logged and the next one is tried; when the chain is exhausted the result
//! is `None` and the plan goes out without maps.

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::MapsConfig;
use crate::error::GeoError;
use crate::models::geo::Coordinates;

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn geocode(&self, place: &str) -> Result<Coordinates, GeoError>;
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResponse {
    #[serde(default)]
    results: Vec<GoogleGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: Coordinates,
}

pub struct GoogleGeocoder {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(http_client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocoder {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn geocode(&self, place: &str) -> Result<Coordinates, GeoError> {
        let url = Url::parse_with_params(
            &format!("{}/maps/api/geocode/json", self.base_url),
            &[("address", place), ("key", self.api_key.as_str())],
        )
        .map_err(|e| GeoError::Payload(e.to_string()))?;

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: GoogleGeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Payload(e.without_url().to_string()))?;

        body.results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or(GeoError::NoResults)
    }
}

#[derive(Debug, Deserialize)]
struct GeoapifyResponse {
    #[serde(default)]
    features: Vec<GeoapifyFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoapifyFeature {
    geometry: GeoapifyGeometry,
}

#[derive(Debug, Deserialize)]
struct GeoapifyGeometry {
    /// [lng, lat]
    coordinates: Vec<f64>,
}

pub struct GeoapifyGeocoder {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GeoapifyGeocoder {
    pub fn new(http_client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl GeocodeProvider for GeoapifyGeocoder {
    fn name(&self) -> &'static str {
        "geoapify"
    }

    async fn geocode(&self, place: &str) -> Result<Coordinates, GeoError> {
        let url = Url::parse_with_params(
            &format!("{}/v1/geocode/search", self.base_url),
            &[("text", place), ("apiKey", self.api_key.as_str())],
        )
        .map_err(|e| GeoError::Payload(e.to_string()))?;

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }

        let body: GeoapifyResponse = response
            .json()
            .await
            .map_err(|e| GeoError::Payload(e.without_url().to_string()))?;

        let feature = body.features.into_iter().next().ok_or(GeoError::NoResults)?;
        match feature.geometry.coordinates.as_slice() {
            [lng, lat, ..] => Ok(Coordinates::new(*lat, *lng)),
            _ => Err(GeoError::Payload("feature without coordinates".to_string())),
        }
    }
}

pub struct GeoResolver {
    providers: Vec<Box<dyn GeocodeProvider>>,
}

impl GeoResolver {
    pub fn new(providers: Vec<Box<dyn GeocodeProvider>>) -> Self {
        Self { providers }
    }

    /// Google first, Geoapify second, each only when its key is configured
    pub fn from_config(config: &MapsConfig, http_client: Client) -> Self {
        let mut providers: Vec<Box<dyn GeocodeProvider>> = Vec::new();
        if let Some(key) = &config.google_maps_api_key {
            providers.push(Box::new(GoogleGeocoder::new(
                http_client.clone(),
                &config.google_maps_base,
                key,
            )));
        }
        if let Some(key) = &config.geoapify_api_key {
            providers.push(Box::new(GeoapifyGeocoder::new(
                http_client,
                &config.geoapify_api_base,
                key,
            )));
        }
        Self::new(providers)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn resolve(&self, place: &str) -> Option<Coordinates> {
        for provider in &self.providers {
            match provider.geocode(place).await {
                Ok(coords) => {
                    info!(
                        "Geocoded '{}' via {} to ({:.4}, {:.4})",
                        place,
                        provider.name(),
                        coords.lat,
                        coords.lng
                    );
                    return Some(coords);
                }
                Err(e) => warn!(
                    "Geocoding '{}' via {} failed, trying next provider: {}",
                    place,
                    provider.name(),
                    e
                ),
            }
        }
        warn!("No geocoding provider could resolve '{}'", place);
        None
    }
}
