use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{CreateCommentRequest, CreatePostRequest};
use crate::services::post_service;
use crate::store::Store;

pub async fn get_posts(store: web::Data<Store>) -> HttpResponse {
    log::info!("📰 GET /posts");
    HttpResponse::Ok().json(post_service::list_posts(&store.read()))
}

pub async fn get_post(store: web::Data<Store>, path: web::Path<String>) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("📰 GET /posts/{}", post_id);

    match post_service::get_post(&store.read(), &post_id) {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Content is required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    request: web::Json<CreatePostRequest>,
) -> HttpResponse {
    log::info!("🆕 POST /posts - by {}", user.sub);

    match post_service::create_post(&store, &user.sub, request.into_inner()) {
        Ok(post) => {
            log::info!("✅ Post created: {}", post.post.id);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Post created successfully",
                "post": post
            }))
        }
        Err(e) => {
            log::warn!("❌ Post creation failed: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "Posts",
    responses(
        (status = 200, description = "Like toggled", body = post_service::LikeResponse),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn like_post(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("👍 POST /posts/{}/like - user: {}", post_id, user.sub);

    match post_service::toggle_like(&store, &post_id, &user.sub) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.to_response(),
    }
}

pub async fn comment_on_post(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
    request: web::Json<CreateCommentRequest>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("💬 POST /posts/{}/comment - user: {}", post_id, user.sub);

    match post_service::add_comment(&store, &post_id, &user.sub, request.into_inner()) {
        Ok(comment) => HttpResponse::Created().json(serde_json::json!({
            "message": "Comment added successfully",
            "comment": comment
        })),
        Err(e) => e.to_response(),
    }
}

pub async fn delete_post(
    user: web::ReqData<Claims>,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> HttpResponse {
    let post_id = path.into_inner();
    log::info!("🗑️ DELETE /posts/{} - user: {}", post_id, user.sub);

    match post_service::delete_post(&store, &post_id, &user.sub) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Post deleted successfully"
        })),
        Err(e) => {
            log::warn!("❌ Post deletion failed: {}", e);
            e.to_response()
        }
    }
}
