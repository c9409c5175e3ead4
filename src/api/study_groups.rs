use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{CreateGroupPostRequest, CreateStudyGroupRequest, ScheduleMeetingRequest};
use crate::services::study_group_service;
use crate::store::Store;

pub async fn get_groups(_user: web::ReqData<Claims>, store: web::Data<Store>) -> HttpResponse {
    log::info!("📚 GET /study-groups");
    HttpResponse::Ok().json(study_group_service::list_groups(&store.read()))
}

pub async fn get_group(
    _user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("📚 GET /study-groups/{}", group_id);

    match study_group_service::get_group(&store.read(), &group_id) {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/study-groups",
    tag = "StudyGroups",
    request_body = CreateStudyGroupRequest,
    responses(
        (status = 201, description = "Group created"),
        (status = 400, description = "Name, description and subject are required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_group(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<CreateStudyGroupRequest>,
) -> HttpResponse {
    log::info!("🆕 POST /study-groups - by {}", user.sub);

    match study_group_service::create_group(&store, &user.sub, request.into_inner()) {
        Ok(group) => {
            log::info!("✅ Study group created: {}", group.id);
            HttpResponse::Created().json(group)
        }
        Err(e) => {
            log::warn!("❌ Study group creation failed: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/study-groups/{id}/join",
    tag = "StudyGroups",
    responses(
        (status = 200, description = "Joined"),
        (status = 409, description = "Already a member or group full")
    ),
    security(("bearer_auth" = []))
)]
pub async fn join_group(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("➕ POST /study-groups/{}/join - user: {}", group_id, user.sub);

    match study_group_service::join_group(&store, &group_id, &user.sub) {
        Ok(group) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Successfully joined the study group",
            "group": group
        })),
        Err(e) => {
            log::warn!("❌ Join failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn leave_group(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("➖ POST /study-groups/{}/leave - user: {}", group_id, user.sub);

    match study_group_service::leave_group(&store, &group_id, &user.sub) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Successfully left the study group"
        })),
        Err(e) => {
            log::warn!("❌ Leave failed: {}", e);
            e.to_response()
        }
    }
}

pub async fn add_group_post(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<CreateGroupPostRequest>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("💬 POST /study-groups/{}/posts - user: {}", group_id, user.sub);

    match study_group_service::add_post(&store, &group_id, &user.sub, request.into_inner()) {
        Ok(post) => HttpResponse::Created().json(post),
        Err(e) => e.to_response(),
    }
}

pub async fn get_group_posts(
    _user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("💬 GET /study-groups/{}/posts", group_id);

    match study_group_service::list_posts(&store.read(), &group_id) {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => e.to_response(),
    }
}

pub async fn schedule_meeting(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<ScheduleMeetingRequest>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("🗓️ POST /study-groups/{}/meetings - user: {}", group_id, user.sub);

    match study_group_service::schedule_meeting(&store, &group_id, &user.sub, request.into_inner())
    {
        Ok(meeting) => HttpResponse::Created().json(meeting),
        Err(e) => e.to_response(),
    }
}

pub async fn get_group_meetings(
    _user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let group_id = path.into_inner();
    log::info!("🗓️ GET /study-groups/{}/meetings", group_id);

    match study_group_service::list_meetings(&store.read(), &group_id) {
        Ok(meetings) => HttpResponse::Ok().json(meetings),
        Err(e) => e.to_response(),
    }
}
