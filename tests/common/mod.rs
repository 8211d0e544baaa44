#![allow(dead_code)]

use actix_web::{middleware::Logger, web, App};
use actix_cors::Cors;
use serde_json::{json, Value};
use std::time::Duration;

use trip_planner_api::config::{AppConfig, GenerationMode};
use trip_planner_api::routes;
use trip_planner_api::services::travel_plan_service::PlanPipeline;

pub const GEMINI_PATH: &str = "/v1beta/models/test-model:generateContent";

pub struct TestApp {
    pub config: web::Data<AppConfig>,
    pub pipeline: web::Data<PlanPipeline>,
}

impl TestApp {
    pub fn new(config: AppConfig) -> Self {
        let pipeline = PlanPipeline::from_config(&config).expect("pipeline builds");
        Self {
            config: web::Data::new(config),
            pipeline: web::Data::new(pipeline),
        }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.config.clone())
            .app_data(self.pipeline.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

/// Config with every provider pointed at `server_url` and no cooldown
pub fn test_config(server_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.generation.api_key = Some("test-gemini-key".to_string());
    config.generation.model = "test-model".to_string();
    config.generation.api_base = server_url.to_string();
    config.generation.cooldown = Duration::from_millis(0);
    config.generation.mode = GenerationMode::Combined;
    config.maps.google_maps_api_key = Some("test-google-key".to_string());
    config.maps.geoapify_api_key = Some("test-geoapify-key".to_string());
    config.maps.google_maps_base = server_url.to_string();
    config.maps.geoapify_api_base = server_url.to_string();
    config.maps.geoapify_maps_base = server_url.to_string();
    config.outbound_timeout = Duration::from_secs(5);
    config
}

/// Config with no credentials and unroutable provider URLs
pub fn offline_config() -> AppConfig {
    let mut config = test_config("http://127.0.0.1:9");
    config.generation.api_key = None;
    config.maps.google_maps_api_key = None;
    config.maps.geoapify_api_key = None;
    config
}

pub fn goa_request() -> Value {
    json!({
        "from_city": "Mumbai",
        "to_city": "Goa",
        "budget": 50000,
        "currency": "INR",
        "duration": 5,
        "travelers": 2
    })
}

/// Wrap `text` in a generateContent response envelope
pub fn gemini_reply(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    })
    .to_string()
}

pub fn combined_sections_json() -> String {
    json!({
        "overview": "Goa is **famous** for beaches.",
        "attractive_places": "1. Baga Beach\n2. Fort Aguada",
        "restaurants": "Breakfast: Infantaria",
        "travel_methods": "Fly or take the Konkan railway.",
        "detailed_itinerary": "Day 1: Arrive\nDay 2: Beaches"
    })
    .to_string()
}
