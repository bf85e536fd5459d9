use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    services::auth_service::{self, LoginRequest, LoginResponse, RegisterRequest},
    state::AppState,
    utils::MessageResponse,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing fields, email or username already in use", body = MessageResponse)
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /auth/register - email: {}", email);

    match auth_service::register(&state.db, state.bcrypt_cost, &request).await {
        Ok(_) => HttpResponse::Created().json(MessageResponse::new("User registered successfully")),
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid email or password", body = MessageResponse)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /auth/login - email: {}", email);

    match auth_service::login(&state.db, &state.tokens, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            e.error_response()
        }
    }
}
