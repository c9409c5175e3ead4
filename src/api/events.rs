use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{CreateEventRequest, EventQuery};
use crate::services::event_service;
use crate::store::Store;

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses((status = 200, description = "Matching events"))
)]
pub async fn get_events(store: web::Data<Store>, query: web::Query<EventQuery>) -> HttpResponse {
    log::info!("📅 GET /events - category: {:?}", query.category);
    let events = event_service::list_events(&store.read(), &query);
    HttpResponse::Ok().json(events)
}

pub async fn get_event(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let event_id = path.into_inner();
    log::info!("📅 GET /events/{}", event_id);

    match event_service::get_event(&store.read(), &event_id) {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created"),
        (status = 400, description = "Missing required field")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_event(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<CreateEventRequest>,
) -> HttpResponse {
    log::info!("🆕 POST /events - \"{}\" by {}", request.title, user.sub);

    match event_service::create_event(&store, &user.sub, request.into_inner()) {
        Ok(event) => {
            log::info!("✅ Event created: {}", event.id);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Event created successfully",
                "event": event
            }))
        }
        Err(e) => {
            log::warn!("❌ Event creation failed: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/rsvp",
    tag = "Events",
    responses(
        (status = 200, description = "RSVP recorded"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Already registered or event full")
    ),
    security(("bearer_auth" = []))
)]
pub async fn rsvp(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let event_id = path.into_inner();
    log::info!("🙋 POST /events/{}/rsvp - user: {}", event_id, user.sub);

    match event_service::rsvp(&store, &event_id, &user.sub) {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "message": "RSVP successful",
            "event": event
        })),
        Err(e) => {
            log::warn!("❌ RSVP failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn cancel_rsvp(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let event_id = path.into_inner();
    log::info!("🚫 DELETE /events/{}/rsvp - user: {}", event_id, user.sub);

    match event_service::cancel_rsvp(&store, &event_id, &user.sub) {
        Ok(event) => HttpResponse::Ok().json(serde_json::json!({
            "message": "RSVP cancelled",
            "event": event
        })),
        Err(e) => e.to_response(),
    }
}
