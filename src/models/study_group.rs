use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Study group (study-groups.json)
///
/// A group with zero members is deleted rather than persisted; when the
/// creator leaves, `created_by` passes to the first remaining member.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub max_members: u32,
    #[serde(default)]
    pub schedule: String,
    pub created_by: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub posts: Vec<GroupPost>,
    #[serde(default)]
    pub meetings: Vec<GroupMeeting>,
    pub created_at: DateTime<Utc>,
}

impl StudyGroup {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_members as usize
    }
}

/// Append-only discussion entry inside a group
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupPost {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<GroupPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupMeeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub datetime: String,
    pub location: String,
    pub scheduled_by: String,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub max_members: Option<u32>,
    pub schedule: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateGroupPostRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScheduleMeetingRequest {
    pub title: String,
    pub description: String,
    pub datetime: String,
    pub location: Option<String>,
}
