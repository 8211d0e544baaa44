use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::{mask_secret, AppConfig};
use crate::services::travel_plan_service::PlanPipeline;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    mode: String,
    mock_mode: bool,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

pub async fn health_check(
    config: web::Data<AppConfig>,
    pipeline: web::Data<PlanPipeline>,
) -> impl Responder {
    let generation = check_generation(&config, &pipeline);
    let geocoding = check_providers("geocoding", pipeline.geocoders());
    let static_maps = check_providers("static map", pipeline.static_map_providers());

    // Static maps are optional; generation and geocoding decide the overall status
    let degraded = generation.status != "ok" || geocoding.status != "ok";

    let mut services = HashMap::new();
    services.insert("generation".to_string(), generation);
    services.insert("geocoding".to_string(), geocoding);
    services.insert("static_maps".to_string(), static_maps);

    let health = HealthStatus {
        status: if degraded { "degraded" } else { "ok" }.to_string(),
        services,
        mode: pipeline.generation_mode().as_str().to_string(),
        mock_mode: pipeline.mock_mode(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(health)
}

fn check_generation(config: &AppConfig, pipeline: &PlanPipeline) -> ServiceStatus {
    match (&config.generation.api_key, pipeline.generation_configured()) {
        (Some(key), true) => ServiceStatus::ok(format!(
            "Gemini API key configured ({}), model {}",
            mask_secret(key),
            config.generation.model
        )),
        _ => ServiceStatus::error("GEMINI_API_KEY not configured".to_string()),
    }
}

fn check_providers(kind: &str, providers: Vec<&'static str>) -> ServiceStatus {
    if providers.is_empty() {
        ServiceStatus::error(format!(
            "No {} provider configured (set GOOGLE_MAPS_API_KEY or GEOAPIFY_API_KEY)",
            kind
        ))
    } else {
        ServiceStatus::ok(format!("{} providers: {}", kind, providers.join(" -> ")))
    }
}
