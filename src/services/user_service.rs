use crate::models::{PublicUser, UpdateProfileRequest};
use crate::store::{Store, Tables};
use crate::utils::ServiceError;

pub fn get_profile(tables: &Tables, user_id: &str) -> Result<PublicUser, ServiceError> {
    tables
        .user_by_id(user_id)
        .map(PublicUser::from)
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
}

/// Applies allow-listed profile fields to the caller's own record. Email,
/// password and id are not reachable through this path.
pub fn update_profile(
    store: &Store,
    target_id: &str,
    caller_id: &str,
    request: UpdateProfileRequest,
) -> Result<PublicUser, ServiceError> {
    if target_id != caller_id {
        return Err(ServiceError::Forbidden(
            "You can only update your own profile".to_string(),
        ));
    }

    store.update(|tables| {
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == target_id)
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        if let Some(name) = request.name {
            if !name.trim().is_empty() {
                user.name = name;
            }
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(area) = request.area {
            user.area = Some(area);
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(interests) = request.interests {
            user.interests = interests;
        }
        if let Some(location) = request.location {
            user.location = Some(location);
        }
        if let Some(age) = request.age {
            user.age = Some(age);
        }
        if let Some(hobbies) = request.hobbies {
            user.hobbies = hobbies;
        }

        Ok(PublicUser::from(&*user))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, User};
    use chrono::Utc;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn seed_user(store: &Store, id: &str) {
        store
            .update(|tables| {
                tables.users.push(User {
                    id: id.to_string(),
                    name: "Mei Lin".to_string(),
                    email: format!("{}@example.com", id),
                    password: Some("hash".to_string()),
                    phone: None,
                    area: None,
                    bio: None,
                    age: None,
                    interests: vec![],
                    hobbies: vec![],
                    location: None,
                    waves: vec![],
                    created_at: Utc::now(),
                });
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn update_is_self_only() {
        let (_dir, store) = test_store();
        seed_user(&store, "u1");
        let err = update_profile(
            &store,
            "u1",
            "u2",
            UpdateProfileRequest {
                name: Some("Other".to_string()),
                phone: None,
                area: None,
                bio: None,
                interests: None,
                location: None,
                age: None,
                hobbies: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn allow_listed_fields_apply() {
        let (_dir, store) = test_store();
        seed_user(&store, "u1");
        let updated = update_profile(
            &store,
            "u1",
            "u1",
            UpdateProfileRequest {
                name: None,
                phone: Some("91234567".to_string()),
                area: Some("Bishan".to_string()),
                bio: None,
                interests: Some(vec!["gardening".to_string()]),
                location: Some(GeoPoint {
                    lat: 1.35,
                    lng: 103.82,
                }),
                age: Some(64),
                hobbies: None,
            },
        )
        .unwrap();
        assert_eq!(updated.area.as_deref(), Some("Bishan"));
        assert_eq!(updated.age, Some(64));
        assert_eq!(updated.interests, vec!["gardening".to_string()]);
        // untouched fields stay as they were
        assert_eq!(updated.name, "Mei Lin");
    }
}
