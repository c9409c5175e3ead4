use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    CreateGroupPostRequest, CreateStudyGroupRequest, GroupMeeting, GroupPost,
    ScheduleMeetingRequest, StudyGroup,
};
use crate::store::{Store, Tables};
use crate::utils::ServiceError;

const DEFAULT_MAX_MEMBERS: u32 = 10;

pub fn list_groups(tables: &Tables) -> Vec<StudyGroup> {
    tables.study_groups.clone()
}

pub fn get_group(tables: &Tables, group_id: &str) -> Result<StudyGroup, ServiceError> {
    tables
        .study_groups
        .iter()
        .find(|g| g.id == group_id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound("Study group not found".to_string()))
}

pub fn create_group(
    store: &Store,
    user_id: &str,
    request: CreateStudyGroupRequest,
) -> Result<StudyGroup, ServiceError> {
    let (name, description, subject) = match (
        request.name.filter(|v| !v.trim().is_empty()),
        request.description.filter(|v| !v.trim().is_empty()),
        request.subject.filter(|v| !v.trim().is_empty()),
    ) {
        (Some(n), Some(d), Some(s)) => (n, d, s),
        _ => {
            return Err(ServiceError::Validation(
                "Name, description, and subject are required".to_string(),
            ))
        }
    };

    let group = StudyGroup {
        id: Uuid::new_v4().to_string(),
        name,
        description,
        subject,
        max_members: request.max_members.unwrap_or(DEFAULT_MAX_MEMBERS),
        schedule: request.schedule.unwrap_or_default(),
        created_by: user_id.to_string(),
        members: vec![user_id.to_string()],
        posts: vec![],
        meetings: vec![],
        created_at: Utc::now(),
    };

    store.update(|tables| {
        tables.study_groups.push(group.clone());
        Ok(group)
    })
}

pub fn join_group(store: &Store, group_id: &str, user_id: &str) -> Result<StudyGroup, ServiceError> {
    store.update(|tables| {
        let group = tables
            .study_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ServiceError::NotFound("Study group not found".to_string()))?;

        if group.is_member(user_id) {
            return Err(ServiceError::Conflict(
                "You are already a member of this group".to_string(),
            ));
        }
        if group.is_full() {
            return Err(ServiceError::Conflict(
                "This study group is full".to_string(),
            ));
        }

        group.members.push(user_id.to_string());
        Ok(group.clone())
    })
}

/// Removes the member. The creator role passes to the first remaining
/// member; a group left with no members is deleted outright.
pub fn leave_group(store: &Store, group_id: &str, user_id: &str) -> Result<(), ServiceError> {
    store.update(|tables| {
        let index = tables
            .study_groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| ServiceError::NotFound("Study group not found".to_string()))?;

        let group = &mut tables.study_groups[index];
        if !group.is_member(user_id) {
            return Err(ServiceError::Conflict(
                "You are not a member of this group".to_string(),
            ));
        }

        group.members.retain(|m| m != user_id);

        if group.created_by == user_id {
            if let Some(next) = group.members.first() {
                group.created_by = next.clone();
            }
        }

        if group.members.is_empty() {
            tables.study_groups.remove(index);
        }
        Ok(())
    })
}

pub fn add_post(
    store: &Store,
    group_id: &str,
    user_id: &str,
    request: CreateGroupPostRequest,
) -> Result<GroupPost, ServiceError> {
    store.update(|tables| {
        let group = tables
            .study_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ServiceError::NotFound("Study group not found".to_string()))?;

        if !group.is_member(user_id) {
            return Err(ServiceError::Forbidden(
                "You must be a member to post".to_string(),
            ));
        }

        let post = GroupPost {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            content: request.content,
            timestamp: Utc::now(),
            replies: vec![],
        };
        group.posts.push(post.clone());
        Ok(post)
    })
}

pub fn list_posts(tables: &Tables, group_id: &str) -> Result<Vec<GroupPost>, ServiceError> {
    get_group(tables, group_id).map(|g| g.posts)
}

pub fn schedule_meeting(
    store: &Store,
    group_id: &str,
    user_id: &str,
    request: ScheduleMeetingRequest,
) -> Result<GroupMeeting, ServiceError> {
    store.update(|tables| {
        let group = tables
            .study_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ServiceError::NotFound("Study group not found".to_string()))?;

        if !group.is_member(user_id) {
            return Err(ServiceError::Forbidden(
                "You must be a member to schedule meetings".to_string(),
            ));
        }

        let meeting = GroupMeeting {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            datetime: request.datetime,
            location: request.location.unwrap_or_else(|| "Online".to_string()),
            scheduled_by: user_id.to_string(),
            attendees: vec![user_id.to_string()],
            created_at: Utc::now(),
        };
        group.meetings.push(meeting.clone());
        Ok(meeting)
    })
}

pub fn list_meetings(tables: &Tables, group_id: &str) -> Result<Vec<GroupMeeting>, ServiceError> {
    get_group(tables, group_id).map(|g| g.meetings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn group_request(max_members: Option<u32>) -> CreateStudyGroupRequest {
        CreateStudyGroupRequest {
            name: Some("Mandarin Beginners".to_string()),
            description: Some("Weekly conversation practice".to_string()),
            subject: Some("Mandarin".to_string()),
            max_members,
            schedule: None,
        }
    }

    #[test]
    fn create_requires_name_description_subject() {
        let (_dir, store) = test_store();
        let mut request = group_request(None);
        request.subject = None;
        let err = create_group(&store, "u1", request).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn join_respects_capacity_and_uniqueness() {
        let (_dir, store) = test_store();
        let group = create_group(&store, "u1", group_request(Some(2))).unwrap();

        let err = join_group(&store, &group.id, "u1").unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        join_group(&store, &group.id, "u2").unwrap();
        let err = join_group(&store, &group.id, "u3").unwrap_err();
        assert_eq!(
            err,
            ServiceError::Conflict("This study group is full".to_string())
        );
    }

    #[test]
    fn creator_leaving_reassigns_ownership() {
        let (_dir, store) = test_store();
        let group = create_group(&store, "u1", group_request(None)).unwrap();
        join_group(&store, &group.id, "u2").unwrap();

        leave_group(&store, &group.id, "u1").unwrap();

        let stored = get_group(&store.read(), &group.id).unwrap();
        assert_eq!(stored.created_by, "u2");
        assert_eq!(stored.members, vec!["u2"]);
    }

    #[test]
    fn empty_group_does_not_persist() {
        let (_dir, store) = test_store();
        let group = create_group(&store, "u1", group_request(None)).unwrap();
        leave_group(&store, &group.id, "u1").unwrap();

        let err = get_group(&store.read(), &group.id).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn non_member_cannot_post_or_schedule() {
        let (_dir, store) = test_store();
        let group = create_group(&store, "u1", group_request(None)).unwrap();

        let err = add_post(
            &store,
            &group.id,
            "outsider",
            CreateGroupPostRequest {
                content: "hi".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = schedule_meeting(
            &store,
            &group.id,
            "outsider",
            ScheduleMeetingRequest {
                title: "Kickoff".to_string(),
                description: "First session".to_string(),
                datetime: "2026-09-01T19:00".to_string(),
                location: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn meetings_default_to_online() {
        let (_dir, store) = test_store();
        let group = create_group(&store, "u1", group_request(None)).unwrap();
        let meeting = schedule_meeting(
            &store,
            &group.id,
            "u1",
            ScheduleMeetingRequest {
                title: "Kickoff".to_string(),
                description: "First session".to_string(),
                datetime: "2026-09-01T19:00".to_string(),
                location: None,
            },
        )
        .unwrap();
        assert_eq!(meeting.location, "Online");
        assert_eq!(meeting.attendees, vec!["u1"]);

        let meetings = list_meetings(&store.read(), &group.id).unwrap();
        assert_eq!(meetings.len(), 1);
    }
}
