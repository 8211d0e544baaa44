use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use trip_planner_api::config::AppConfig;
use trip_planner_api::routes;
use trip_planner_api::services::travel_plan_service::PlanPipeline;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Application starting...");

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let config = AppConfig::from_env();
    if config.generation.api_key.is_none() {
        warn!("GEMINI_API_KEY not set; plan requests will fail unless mock mode is used");
    }
    if config.mock_mode {
        info!("USE_MOCK_MODE is on; generation and geocoding are bypassed");
    }

    let pipeline = PlanPipeline::from_config(&config).map_err(|e| {
        error!("Failed to build plan pipeline: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    info!(
        "Plan pipeline ready: mode={}, geocoders={:?}, static maps={:?}",
        pipeline.generation_mode().as_str(),
        pipeline.geocoders(),
        pipeline.static_map_providers()
    );

    let config = web::Data::new(config);
    let pipeline = web::Data::new(pipeline);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(config.clone())
            .app_data(pipeline.clone())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
