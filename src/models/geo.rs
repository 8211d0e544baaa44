use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Map imagery for the destination. Both parts are absent when geocoding fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive_map: Option<String>,
}

impl MapBundle {
    pub fn is_empty(&self) -> bool {
        self.static_map_url.is_none() && self.interactive_map.is_none()
    }
}
