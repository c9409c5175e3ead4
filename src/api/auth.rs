use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::services::auth_service;
use crate::store::Store;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = auth_service::RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = auth_service::AuthResponse),
        (status = 400, description = "Missing field or email already taken")
    )
)]
pub async fn register(
    store: web::Data<Store>,
    request: web::Json<auth_service::RegisterRequest>,
) -> HttpResponse {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("📝 POST /auth/register - email: {}", email);

    match auth_service::register(&store, &request) {
        Ok(response) => {
            log::info!("✅ Registered: {}", email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = auth_service::LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = auth_service::AuthResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn login(
    store: web::Data<Store>,
    request: web::Json<auth_service::LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(&store, &request) {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user profile"),
        (status = 401, description = "Invalid or expired token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(user: web::ReqData<Claims>, store: web::Data<Store>) -> HttpResponse {
    log::info!("👤 GET /auth/me - user: {}", user.sub);

    match auth_service::me(&store, &user.sub) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_response(),
    }
}
