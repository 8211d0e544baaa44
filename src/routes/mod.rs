use actix_web::web;

pub mod health;
pub mod ping;
pub mod travel_plan;

/// Prefix the serverless function gateway puts in front of the API
pub const FUNCTION_GATEWAY_PREFIX: &str = "/.netlify/functions/api";

fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(travel_plan::json_config())
        .route("/ping", web::get().to(ping::ping))
        .route("/travel-plan", web::post().to(travel_plan::create_plan));
}

/// Register every route. Shared state (`AppConfig`, `PlanPipeline`) is added
/// by the caller as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(web::scope("/api").configure(api_routes))
        .service(web::scope(FUNCTION_GATEWAY_PREFIX).configure(api_routes));
}
