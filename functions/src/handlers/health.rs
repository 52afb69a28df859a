use actix_web::HttpResponse;

use crate::models::HealthResponse;
use crate::SERVICE_NAME;

pub async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
