use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, Responder};
use log::warn;
use uuid::Uuid;

use crate::models::plan::{PlanRequestBody, PlanResult};
use crate::services::travel_plan_service::PlanPipeline;

const MOCK_MODE_HEADER: &str = "x-mock-mode";
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/*
    /api/travel-plan
*/
pub async fn create_plan(
    req: HttpRequest,
    pipeline: web::Data<PlanPipeline>,
    input: web::Json<PlanRequestBody>,
) -> impl Responder {
    let request_id = Uuid::new_v4().to_string();
    let force_mock = req
        .headers()
        .get(MOCK_MODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    match pipeline.plan_trip(&input, force_mock, &request_id).await {
        Ok(plan) => HttpResponse::Ok().json(PlanResult::success(plan)),
        Err(err) => HttpResponse::build(err.status_code()).json(PlanResult::failure(err.to_string())),
    }
}

/// Malformed bodies get the same envelope as validation failures
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            warn!("Rejected travel plan body: {}", err);
            let response = HttpResponse::BadRequest()
                .json(PlanResult::failure(format!("Invalid request body: {}", err)));
            InternalError::from_response(err, response).into()
        })
}
