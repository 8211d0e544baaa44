use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::config::AppConfig;

/*
    /api/ping
*/
pub async fn ping(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": config.ping_message }))
}
