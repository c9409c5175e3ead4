use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    Caregiver, CaregiverLocation, CaregiverQuery, CaregiverUpdate, CaregiverWithDistance,
    RegisterCaregiverRequest, UpdateCaregiverRequest,
};
use crate::store::{Store, Tables};
use crate::utils::{geo, ServiceError};

/// Contact card returned to a user who wants to reach a caregiver. No mail
/// or notification is sent.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CaregiverContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

pub fn list_caregivers(tables: &Tables, query: &CaregiverQuery) -> Vec<Caregiver> {
    tables
        .caregivers
        .iter()
        .filter(|cg| match &query.area {
            Some(area) => cg
                .location
                .area
                .to_lowercase()
                .contains(&area.to_lowercase()),
            None => true,
        })
        .filter(|cg| match &query.service {
            Some(service) => {
                let needle = service.to_lowercase();
                cg.services.iter().any(|s| s.to_lowercase().contains(&needle))
            }
            None => true,
        })
        .filter(|cg| match query.min_rating {
            Some(min) => cg.rating >= min,
            None => true,
        })
        .cloned()
        .collect()
}

pub fn get_caregiver(tables: &Tables, caregiver_id: &str) -> Result<Caregiver, ServiceError> {
    tables
        .caregivers
        .iter()
        .find(|cg| cg.id == caregiver_id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound("Caregiver not found".to_string()))
}

pub fn register_caregiver(
    store: &Store,
    user_id: &str,
    request: RegisterCaregiverRequest,
) -> Result<Caregiver, ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }

    let caregiver = Caregiver {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        name: request.name,
        phone: request.phone.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        bio: request.bio.unwrap_or_default(),
        services: request.services.unwrap_or_default(),
        hourly_rate: request.hourly_rate.unwrap_or(0.0),
        availability: request.availability.unwrap_or_default(),
        experience: request.experience.unwrap_or_else(|| "0 years".to_string()),
        certifications: request.certifications.unwrap_or_default(),
        rating: 0.0,
        reviews: 0,
        verified: false,
        location: request.location.unwrap_or_default(),
        updates: vec![],
        created_at: Utc::now(),
    };

    store.update(|tables| {
        tables.caregivers.push(caregiver.clone());
        Ok(caregiver)
    })
}

/// Applies the allow-listed profile fields. Rating, review count, id and
/// creation time are never client-writable. Owner only.
pub fn update_caregiver(
    store: &Store,
    caregiver_id: &str,
    user_id: &str,
    request: UpdateCaregiverRequest,
) -> Result<Caregiver, ServiceError> {
    store.update(|tables| {
        let caregiver = tables
            .caregivers
            .iter_mut()
            .find(|cg| cg.id == caregiver_id)
            .ok_or_else(|| ServiceError::NotFound("Caregiver not found".to_string()))?;

        if caregiver.user_id != user_id {
            return Err(ServiceError::Forbidden(
                "You can only update your own caregiver profile".to_string(),
            ));
        }

        if let Some(name) = request.name {
            caregiver.name = name;
        }
        if let Some(phone) = request.phone {
            caregiver.phone = phone;
        }
        if let Some(email) = request.email {
            caregiver.email = email;
        }
        if let Some(bio) = request.bio {
            caregiver.bio = bio;
        }
        if let Some(services) = request.services {
            caregiver.services = services;
        }
        if let Some(rate) = request.hourly_rate {
            caregiver.hourly_rate = rate;
        }
        if let Some(availability) = request.availability {
            caregiver.availability = availability;
        }
        if let Some(location) = request.location {
            caregiver.location = location;
        }
        if let Some(experience) = request.experience {
            caregiver.experience = experience;
        }
        if let Some(certifications) = request.certifications {
            caregiver.certifications = certifications;
        }

        Ok(caregiver.clone())
    })
}

/// Prepends an entry to the caregiver's update feed (newest first).
pub fn add_update(
    store: &Store,
    caregiver_id: &str,
    message: &str,
) -> Result<CaregiverUpdate, ServiceError> {
    store.update(|tables| {
        let caregiver = tables
            .caregivers
            .iter_mut()
            .find(|cg| cg.id == caregiver_id)
            .ok_or_else(|| ServiceError::NotFound("Caregiver not found".to_string()))?;

        let update = CaregiverUpdate {
            id: Uuid::new_v4().to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            message: message.to_string(),
        };
        caregiver.updates.insert(0, update.clone());
        Ok(update)
    })
}

pub fn contact_caregiver(
    tables: &Tables,
    caregiver_id: &str,
) -> Result<CaregiverContact, ServiceError> {
    let caregiver = tables
        .caregivers
        .iter()
        .find(|cg| cg.id == caregiver_id)
        .ok_or_else(|| ServiceError::NotFound("Caregiver not found".to_string()))?;

    Ok(CaregiverContact {
        name: caregiver.name.clone(),
        phone: caregiver.phone.clone(),
        email: caregiver.email.clone(),
    })
}

/// Caregivers within `radius_km` of the caller, ascending distance.
/// Distances are reported rounded to 2 decimals; a NaN distance fails the
/// radius check and is dropped.
pub fn nearby_caregivers(
    tables: &Tables,
    lat: f64,
    lng: f64,
    radius_km: f64,
) -> Vec<CaregiverWithDistance> {
    let mut nearby: Vec<CaregiverWithDistance> = tables
        .caregivers
        .iter()
        .filter_map(|cg| {
            let distance = geo::haversine_km(lat, lng, cg.location.lat, cg.location.lng);
            if distance <= radius_km {
                Some(CaregiverWithDistance {
                    caregiver: cg.clone(),
                    distance: (distance * 100.0).round() / 100.0,
                })
            } else {
                None
            }
        })
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        (dir, store)
    }

    fn register_request(name: &str, area: &str, lat: f64, lng: f64) -> RegisterCaregiverRequest {
        RegisterCaregiverRequest {
            name: name.to_string(),
            phone: Some("91234567".to_string()),
            email: Some("cg@example.com".to_string()),
            bio: None,
            services: Some(vec!["Elderly care".to_string()]),
            hourly_rate: Some(18.0),
            availability: None,
            location: Some(CaregiverLocation {
                area: area.to_string(),
                lat,
                lng,
            }),
            experience: None,
            certifications: None,
        }
    }

    #[test]
    fn listing_filters_compose() {
        let (_dir, store) = test_store();
        register_caregiver(&store, "u1", register_request("Aunty May", "Bishan", 1.35, 103.85))
            .unwrap();
        let mut other = register_request("Uncle Bob", "Jurong", 1.33, 103.70);
        other.services = Some(vec!["Babysitting".to_string()]);
        register_caregiver(&store, "u2", other).unwrap();

        let tables = store.read();
        let by_area = list_caregivers(
            &tables,
            &CaregiverQuery {
                area: Some("bishan".to_string()),
                ..CaregiverQuery::default()
            },
        );
        assert_eq!(by_area.len(), 1);
        assert_eq!(by_area[0].name, "Aunty May");

        let by_service = list_caregivers(
            &tables,
            &CaregiverQuery {
                service: Some("babysit".to_string()),
                ..CaregiverQuery::default()
            },
        );
        assert_eq!(by_service.len(), 1);
        assert_eq!(by_service[0].name, "Uncle Bob");
    }

    #[test]
    fn update_is_owner_only() {
        let (_dir, store) = test_store();
        let caregiver = register_caregiver(
            &store,
            "owner",
            register_request("Aunty May", "Bishan", 1.35, 103.85),
        )
        .unwrap();

        let err = update_caregiver(
            &store,
            &caregiver.id,
            "intruder",
            UpdateCaregiverRequest {
                name: Some("Hacked".to_string()),
                phone: None,
                email: None,
                bio: None,
                services: None,
                hourly_rate: None,
                availability: None,
                location: None,
                experience: None,
                certifications: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let updated = update_caregiver(
            &store,
            &caregiver.id,
            "owner",
            UpdateCaregiverRequest {
                name: None,
                phone: None,
                email: None,
                bio: Some("20 years with seniors".to_string()),
                services: None,
                hourly_rate: Some(22.0),
                availability: None,
                location: None,
                experience: None,
                certifications: None,
            },
        )
        .unwrap();
        assert_eq!(updated.hourly_rate, 22.0);
        // rating stays server-owned
        assert_eq!(updated.rating, 0.0);
    }

    #[test]
    fn updates_feed_is_newest_first() {
        let (_dir, store) = test_store();
        let caregiver = register_caregiver(
            &store,
            "u1",
            register_request("Aunty May", "Bishan", 1.35, 103.85),
        )
        .unwrap();

        add_update(&store, &caregiver.id, "first").unwrap();
        add_update(&store, &caregiver.id, "second").unwrap();

        let stored = get_caregiver(&store.read(), &caregiver.id).unwrap();
        assert_eq!(stored.updates[0].message, "second");
        assert_eq!(stored.updates[1].message, "first");
    }

    #[test]
    fn nearby_sorts_ascending_and_respects_radius() {
        let (_dir, store) = test_store();
        register_caregiver(&store, "u1", register_request("Near", "Bishan", 1.3550, 103.8200))
            .unwrap();
        register_caregiver(&store, "u2", register_request("Nearer", "Bishan", 1.3525, 103.8199))
            .unwrap();
        register_caregiver(&store, "u3", register_request("Far", "Johor", 2.0, 104.0)).unwrap();

        let nearby = nearby_caregivers(&store.read(), 1.3521, 103.8198, 5.0);
        let names: Vec<&str> = nearby.iter().map(|c| c.caregiver.name.as_str()).collect();
        assert_eq!(names, vec!["Nearer", "Near"]);
        assert!(nearby[0].distance <= nearby[1].distance);
    }

    #[test]
    fn contact_returns_card_without_side_effects() {
        let (_dir, store) = test_store();
        let caregiver = register_caregiver(
            &store,
            "u1",
            register_request("Aunty May", "Bishan", 1.35, 103.85),
        )
        .unwrap();

        let contact = contact_caregiver(&store.read(), &caregiver.id).unwrap();
        assert_eq!(contact.name, "Aunty May");
        assert_eq!(contact.phone, "91234567");
    }
}
