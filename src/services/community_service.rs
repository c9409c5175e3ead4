use chrono::Utc;
use uuid::Uuid;

use crate::models::{Community, CreateCommunityRequest};
use crate::store::{Store, Tables};
use crate::utils::ServiceError;

pub fn list_communities(tables: &Tables) -> Vec<Community> {
    tables.communities.clone()
}

pub fn get_community(tables: &Tables, community_id: &str) -> Result<Community, ServiceError> {
    tables
        .communities
        .iter()
        .find(|c| c.id == community_id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound("Community not found".to_string()))
}

/// The creator becomes organizer and first member.
pub fn create_community(
    store: &Store,
    organizer_id: &str,
    request: CreateCommunityRequest,
) -> Result<Community, ServiceError> {
    for (value, field) in [
        (&request.name, "Name"),
        (&request.description, "Description"),
        (&request.category, "Category"),
        (&request.location, "Location"),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{} is required", field)));
        }
    }

    let community = Community {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        description: request.description,
        category: request.category,
        location: request.location,
        organizer_id: organizer_id.to_string(),
        members: vec![organizer_id.to_string()],
        created_at: Utc::now(),
    };

    store.update(|tables| {
        tables.communities.push(community.clone());
        Ok(community)
    })
}

pub fn join_community(
    store: &Store,
    community_id: &str,
    user_id: &str,
) -> Result<Community, ServiceError> {
    store.update(|tables| {
        let community = tables
            .communities
            .iter_mut()
            .find(|c| c.id == community_id)
            .ok_or_else(|| ServiceError::NotFound("Community not found".to_string()))?;

        if community.members.iter().any(|m| m == user_id) {
            return Err(ServiceError::Conflict(
                "Already a member of this community".to_string(),
            ));
        }

        community.members.push(user_id.to_string());
        Ok(community.clone())
    })
}

/// The organizer holds non-revocable membership and can never leave.
pub fn leave_community(
    store: &Store,
    community_id: &str,
    user_id: &str,
) -> Result<Community, ServiceError> {
    store.update(|tables| {
        let community = tables
            .communities
            .iter_mut()
            .find(|c| c.id == community_id)
            .ok_or_else(|| ServiceError::NotFound("Community not found".to_string()))?;

        if community.organizer_id == user_id {
            return Err(ServiceError::Conflict(
                "Organizer cannot leave community".to_string(),
            ));
        }

        let index = community
            .members
            .iter()
            .position(|m| m == user_id)
            .ok_or_else(|| {
                ServiceError::Conflict("Not a member of this community".to_string())
            })?;

        community.members.remove(index);
        Ok(community.clone())
    })
}

/// Communities the user belongs to.
pub fn communities_for_user(tables: &Tables, user_id: &str) -> Vec<Community> {
    tables
        .communities
        .iter()
        .filter(|c| c.members.iter().any(|m| m == user_id))
        .cloned()
        .collect()
}
