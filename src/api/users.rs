use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::UpdateProfileRequest;
use crate::services::{community_service, event_service, peer_service, user_service};
use crate::store::Store;

#[utoipa::path(
    get,
    path = "/api/users/peers/all",
    tag = "Peers",
    responses((status = 200, description = "All users minus passwords")),
    security(("bearer_auth" = []))
)]
pub async fn get_all_peers(_user: web::ReqData<Claims>, store: web::Data<Store>) -> HttpResponse {
    log::info!("🧑‍🤝‍🧑 GET /users/peers/all");
    let peers = peer_service::all_peers(&store.read());
    HttpResponse::Ok().json(peers)
}

#[utoipa::path(
    post,
    path = "/api/users/peers/match",
    tag = "Peers",
    request_body = peer_service::PeerFilter,
    responses(
        (status = 200, description = "Filtered peers ranked by match score", body = [peer_service::PeerMatch]),
        (status = 400, description = "Requester has no location set")
    ),
    security(("bearer_auth" = []))
)]
pub async fn match_peers(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    filter: web::Json<peer_service::PeerFilter>,
) -> HttpResponse {
    log::info!(
        "🎯 POST /users/peers/match - user: {} (≤{}km)",
        user.sub,
        filter.distance_km
    );

    match peer_service::match_peers(&store.read(), &user.sub, &filter) {
        Ok(matches) => {
            log::info!("✅ {} peers matched", matches.len());
            HttpResponse::Ok().json(matches)
        }
        Err(e) => {
            log::warn!("❌ Peer matching failed: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users/wave",
    tag = "Peers",
    request_body = peer_service::WaveRequest,
    responses(
        (status = 200, description = "Wave delivered"),
        (status = 404, description = "Peer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn send_wave(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<peer_service::WaveRequest>,
) -> HttpResponse {
    log::info!("👋 POST /users/wave - {} → {}", user.sub, request.to_peer_id);

    match peer_service::send_wave(&store, &user.sub, &request) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Wave sent successfully!"
        })),
        Err(e) => e.to_response(),
    }
}

pub async fn get_waves(user: web::ReqData<Claims>, store: web::Data<Store>) -> HttpResponse {
    log::info!("📨 GET /users/waves - user: {}", user.sub);

    match peer_service::received_waves(&store.read(), &user.sub) {
        Ok(waves) => HttpResponse::Ok().json(waves),
        Err(e) => e.to_response(),
    }
}

pub async fn get_user(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("👤 GET /users/{}", user_id);

    match user_service::get_profile(&store.read(), &user_id) {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 403, description = "Not your profile")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    let target_id = path.into_inner();
    log::info!("✏️ PUT /users/{} - by {}", target_id, user.sub);

    match user_service::update_profile(&store, &target_id, &user.sub, request.into_inner()) {
        Ok(profile) => {
            log::info!("✅ Profile updated: {}", target_id);
            HttpResponse::Ok().json(profile)
        }
        Err(e) => {
            log::warn!("❌ Profile update failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn get_user_events(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("📅 GET /users/{}/events", user_id);
    let events = event_service::events_for_user(&store.read(), &user_id);
    HttpResponse::Ok().json(events)
}

pub async fn get_user_communities(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let user_id = path.into_inner();
    log::info!("🏘️ GET /users/{}/communities", user_id);
    let communities = community_service::communities_for_user(&store.read(), &user_id);
    HttpResponse::Ok().json(communities)
}
