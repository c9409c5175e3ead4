use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feed post (posts.json)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// "text", "photo" or "video"
    #[serde(rename = "type", default = "default_post_type")]
    pub post_type: String,
    /// Reference to already-hosted media; uploads are handled elsewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    /// User ids; toggled by the like endpoint
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_post_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Minimal author card embedded into post responses
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PostAuthor {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Post enriched with its author for listing responses
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: PostAuthor,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub media: Option<MediaRef>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
}
