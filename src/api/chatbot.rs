use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::services::chatbot_service;
use crate::store::Store;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/chatbot/chat",
    tag = "Chatbot",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Bot reply"),
        (status = 400, description = "Message is required")
    )
)]
pub async fn chat(store: web::Data<Store>, request: web::Json<ChatRequest>) -> HttpResponse {
    let message = match request.message.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(message) => message,
        None => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Message is required"
            }))
        }
    };

    log::info!("🤖 POST /chatbot/chat");
    let reply = chatbot_service::process_message(&store.read(), message);

    HttpResponse::Ok().json(serde_json::json!({
        "message": reply,
        "timestamp": Utc::now()
    }))
}
