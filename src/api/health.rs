use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, mut response) = match state.db.ping().await {
        Ok(()) => ("healthy", HttpResponse::Ok()),
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            ("unhealthy", HttpResponse::ServiceUnavailable())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
