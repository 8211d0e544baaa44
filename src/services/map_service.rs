use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;

use crate::config::MapsConfig;
use crate::error::GeoError;
use crate::models::geo::{Coordinates, MapBundle};

const MAP_ZOOM: u8 = 12;
const MAP_WIDTH: u32 = 600;
const MAP_HEIGHT: u32 = 400;

#[async_trait]
pub trait StaticMapProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn map_url(&self, center: Coordinates) -> Result<String, GeoError>;
}

/// Google static map, checked with a HEAD request before it is handed out
pub struct GoogleStaticMap {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleStaticMap {
    pub fn new(http_client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn build_url(&self, center: Coordinates) -> String {
        format!(
            "{}/maps/api/staticmap?center={lat},{lng}&zoom={zoom}&size={w}x{h}&markers=color:red%7C{lat},{lng}&key={key}",
            self.base_url,
            lat = center.lat,
            lng = center.lng,
            zoom = MAP_ZOOM,
            w = MAP_WIDTH,
            h = MAP_HEIGHT,
            key = self.api_key
        )
    }
}

#[async_trait]
impl StaticMapProvider for GoogleStaticMap {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn map_url(&self, center: Coordinates) -> Result<String, GeoError> {
        let url = self.build_url(center);
        let response = self.http_client.head(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeoError::Status(response.status().as_u16()));
        }
        Ok(url)
    }
}

/// Geoapify static map. Used as the last resort, so it is not verified.
pub struct GeoapifyStaticMap {
    base_url: String,
    api_key: String,
}

impl GeoapifyStaticMap {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl StaticMapProvider for GeoapifyStaticMap {
    fn name(&self) -> &'static str {
        "geoapify"
    }

    async fn map_url(&self, center: Coordinates) -> Result<String, GeoError> {
        Ok(format!(
            "{}/v1/staticmap?style=osm-bright&width={w}&height={h}&center=lonlat:{lng},{lat}&zoom={zoom}&marker=lonlat:{lng},{lat};type:material;color:%23ff0000;size:large&apiKey={key}",
            self.base_url,
            w = MAP_WIDTH,
            h = MAP_HEIGHT,
            lng = center.lng,
            lat = center.lat,
            zoom = MAP_ZOOM,
            key = self.api_key
        ))
    }
}

pub struct MapComposer {
    static_providers: Vec<Box<dyn StaticMapProvider>>,
}

impl MapComposer {
    pub fn new(static_providers: Vec<Box<dyn StaticMapProvider>>) -> Self {
        Self { static_providers }
    }

    pub fn from_config(config: &MapsConfig, http_client: Client) -> Self {
        let mut providers: Vec<Box<dyn StaticMapProvider>> = Vec::new();
        if let Some(key) = &config.google_maps_api_key {
            providers.push(Box::new(GoogleStaticMap::new(
                http_client,
                &config.google_maps_base,
                key,
            )));
        }
        if let Some(key) = &config.geoapify_api_key {
            providers.push(Box::new(GeoapifyStaticMap::new(
                &config.geoapify_maps_base,
                key,
            )));
        }
        Self::new(providers)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.static_providers.iter().map(|p| p.name()).collect()
    }

    pub async fn compose_static(&self, center: Coordinates) -> Option<String> {
        for provider in &self.static_providers {
            match provider.map_url(center).await {
                Ok(url) => {
                    info!("Static map built with {}", provider.name());
                    return Some(url);
                }
                Err(e) => warn!(
                    "Static map via {} failed for ({:.4}, {:.4}), trying next provider: {}",
                    provider.name(),
                    center.lat,
                    center.lng,
                    e
                ),
            }
        }
        None
    }

    pub fn compose_interactive(&self, center: Coordinates) -> String {
        format!(
            r#"<div style="width: 100%; height: 400px; border: 1px solid #ddd; border-radius: 8px; overflow: hidden;">
  <iframe
    width="100%"
    height="400"
    src="https://maps.google.com/maps?q={lat},{lng}&hl=es&z={zoom}&output=embed"
    style="border: none;">
  </iframe>
</div>"#,
            lat = center.lat,
            lng = center.lng,
            zoom = MAP_ZOOM
        )
    }

    /// Maps depend on the destination; the interactive embed additionally
    /// needs the origin to have resolved.
    pub async fn compose(
        &self,
        origin: Option<Coordinates>,
        destination: Option<Coordinates>,
    ) -> MapBundle {
        let Some(destination) = destination else {
            return MapBundle::default();
        };

        MapBundle {
            static_map_url: self.compose_static(destination).await,
            interactive_map: origin.map(|_| self.compose_interactive(destination)),
        }
    }
}
