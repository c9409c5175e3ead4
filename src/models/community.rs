use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interest or neighbourhood community (communities.json)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    /// Always a member; cannot leave
    pub organizer_id: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunityRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    pub location: String,
}
