use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::CreateCommunityRequest;
use crate::services::community_service;
use crate::store::Store;

pub async fn get_communities(store: web::Data<Store>) -> HttpResponse {
    log::info!("🏘️ GET /communities");
    HttpResponse::Ok().json(community_service::list_communities(&store.read()))
}

pub async fn get_community(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let community_id = path.into_inner();
    log::info!("🏘️ GET /communities/{}", community_id);

    match community_service::get_community(&store.read(), &community_id) {
        Ok(community) => HttpResponse::Ok().json(community),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/communities",
    tag = "Communities",
    request_body = CreateCommunityRequest,
    responses(
        (status = 201, description = "Community created"),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_community(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<CreateCommunityRequest>,
) -> HttpResponse {
    log::info!("🆕 POST /communities - \"{}\" by {}", request.name, user.sub);

    match community_service::create_community(&store, &user.sub, request.into_inner()) {
        Ok(community) => {
            log::info!("✅ Community created: {}", community.id);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Community created successfully",
                "community": community
            }))
        }
        Err(e) => {
            log::warn!("❌ Community creation failed: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/communities/{id}/join",
    tag = "Communities",
    responses(
        (status = 200, description = "Joined"),
        (status = 404, description = "Community not found"),
        (status = 409, description = "Already a member")
    ),
    security(("bearer_auth" = []))
)]
pub async fn join_community(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let community_id = path.into_inner();
    log::info!("➕ POST /communities/{}/join - user: {}", community_id, user.sub);

    match community_service::join_community(&store, &community_id, &user.sub) {
        Ok(community) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Joined community successfully",
            "community": community
        })),
        Err(e) => {
            log::warn!("❌ Join failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn leave_community(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let community_id = path.into_inner();
    log::info!("➖ POST /communities/{}/leave - user: {}", community_id, user.sub);

    match community_service::leave_community(&store, &community_id, &user.sub) {
        Ok(community) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Left community successfully",
            "community": community
        })),
        Err(e) => {
            log::warn!("❌ Leave failed: {}", e);
            e.to_response()
        }
    }
}
