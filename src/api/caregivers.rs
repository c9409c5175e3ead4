use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::middleware::auth::Claims;
use crate::models::{CaregiverQuery, RegisterCaregiverRequest, UpdateCaregiverRequest};
use crate::services::caregiver_service;
use crate::store::Store;

const DEFAULT_RADIUS_KM: f64 = 5.0;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Search radius in km, default 5
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CaregiverUpdateRequest {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/caregivers",
    tag = "Caregivers",
    responses((status = 200, description = "Matching caregivers"))
)]
pub async fn get_caregivers(
    store: web::Data<Store>,
    query: web::Query<CaregiverQuery>,
) -> HttpResponse {
    log::info!("🤝 GET /caregivers - area: {:?}", query.area);
    HttpResponse::Ok().json(caregiver_service::list_caregivers(&store.read(), &query))
}

#[utoipa::path(
    get,
    path = "/api/caregivers/nearby/{lat}/{lng}",
    tag = "Caregivers",
    params(
        ("lat" = f64, Path, description = "Caller latitude"),
        ("lng" = f64, Path, description = "Caller longitude")
    ),
    responses((status = 200, description = "Caregivers within the radius, nearest first", body = [crate::models::CaregiverWithDistance]))
)]
pub async fn get_nearby_caregivers(
    store: web::Data<Store>,
    path: web::Path<(f64, f64)>,
    query: web::Query<NearbyQuery>,
) -> HttpResponse {
    let (lat, lng) = path.into_inner();
    let radius = query.radius.unwrap_or(DEFAULT_RADIUS_KM);
    log::info!("📍 GET /caregivers/nearby/{}/{} (≤{}km)", lat, lng, radius);

    let nearby = caregiver_service::nearby_caregivers(&store.read(), lat, lng, radius);
    HttpResponse::Ok().json(nearby)
}

pub async fn get_caregiver(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let caregiver_id = path.into_inner();
    log::info!("🤝 GET /caregivers/{}", caregiver_id);

    match caregiver_service::get_caregiver(&store.read(), &caregiver_id) {
        Ok(caregiver) => HttpResponse::Ok().json(caregiver),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/caregivers/register",
    tag = "Caregivers",
    request_body = RegisterCaregiverRequest,
    responses(
        (status = 201, description = "Caregiver profile created"),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_caregiver(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<RegisterCaregiverRequest>,
) -> HttpResponse {
    log::info!("🆕 POST /caregivers/register - by {}", user.sub);

    match caregiver_service::register_caregiver(&store, &user.sub, request.into_inner()) {
        Ok(caregiver) => {
            log::info!("✅ Caregiver registered: {}", caregiver.id);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Caregiver profile created successfully",
                "caregiver": caregiver
            }))
        }
        Err(e) => e.to_response(),
    }
}

pub async fn update_caregiver(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<UpdateCaregiverRequest>,
) -> HttpResponse {
    let caregiver_id = path.into_inner();
    log::info!("✏️ PUT /caregivers/{} - by {}", caregiver_id, user.sub);

    match caregiver_service::update_caregiver(&store, &caregiver_id, &user.sub, request.into_inner())
    {
        Ok(caregiver) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Caregiver profile updated",
            "caregiver": caregiver
        })),
        Err(e) => {
            log::warn!("❌ Caregiver update failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn add_caregiver_update(
    _user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<CaregiverUpdateRequest>,
) -> HttpResponse {
    let caregiver_id = path.into_inner();
    log::info!("📣 POST /caregivers/{}/updates", caregiver_id);

    match caregiver_service::add_update(&store, &caregiver_id, &request.message) {
        Ok(update) => HttpResponse::Created().json(serde_json::json!({
            "message": "Update added",
            "update": update
        })),
        Err(e) => e.to_response(),
    }
}

pub async fn contact_caregiver(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let caregiver_id = path.into_inner();
    log::info!("☎️ POST /caregivers/{}/contact - by {}", caregiver_id, user.sub);

    match caregiver_service::contact_caregiver(&store.read(), &caregiver_id) {
        Ok(contact) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Contact request sent successfully",
            "contact": contact
        })),
        Err(e) => e.to_response(),
    }
}
