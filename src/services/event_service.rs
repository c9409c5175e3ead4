use chrono::Utc;
use uuid::Uuid;

use crate::models::{CreateEventRequest, Event, EventQuery};
use crate::store::{Store, Tables};
use crate::utils::ServiceError;

/// Events filtered by category and free-text search over title/description.
pub fn list_events(tables: &Tables, query: &EventQuery) -> Vec<Event> {
    tables
        .events
        .iter()
        .filter(|e| match &query.category {
            Some(category) => e.category == *category,
            None => true,
        })
        .filter(|e| match &query.search {
            Some(search) => {
                let needle = search.to_lowercase();
                e.title.to_lowercase().contains(&needle)
                    || e.description.to_lowercase().contains(&needle)
            }
            None => true,
        })
        .cloned()
        .collect()
}

pub fn get_event(tables: &Tables, event_id: &str) -> Result<Event, ServiceError> {
    tables
        .events
        .iter()
        .find(|e| e.id == event_id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))
}

pub fn create_event(
    store: &Store,
    organizer_id: &str,
    request: CreateEventRequest,
) -> Result<Event, ServiceError> {
    for (value, field) in [
        (&request.title, "Title"),
        (&request.description, "Description"),
        (&request.date, "Date"),
        (&request.time, "Time"),
        (&request.location, "Location"),
        (&request.category, "Category"),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{} is required", field)));
        }
    }

    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        date: request.date,
        time: request.time,
        location: request.location,
        category: request.category,
        max_attendees: request.max_attendees,
        community_id: request.community_id,
        organizer_id: organizer_id.to_string(),
        attendees: vec![],
        coordinates: request.coordinates,
        external_url: request.external_url,
        created_at: Utc::now(),
    };

    store.update(|tables| {
        tables.events.push(event.clone());
        Ok(event)
    })
}

/// Records an RSVP. Duplicate RSVPs and full events are conflicts; the
/// attendee list keeps RSVP order.
pub fn rsvp(store: &Store, event_id: &str, user_id: &str) -> Result<Event, ServiceError> {
    store.update(|tables| {
        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))?;

        if event.attendees.iter().any(|a| a == user_id) {
            return Err(ServiceError::Conflict(
                "Already registered for this event".to_string(),
            ));
        }
        if event.is_full() {
            return Err(ServiceError::Conflict("Event is full".to_string()));
        }

        event.attendees.push(user_id.to_string());
        Ok(event.clone())
    })
}

pub fn cancel_rsvp(store: &Store, event_id: &str, user_id: &str) -> Result<Event, ServiceError> {
    store.update(|tables| {
        let event = tables
            .events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| ServiceError::NotFound("Event not found".to_string()))?;

        let index = event
            .attendees
            .iter()
            .position(|a| a == user_id)
            .ok_or_else(|| {
                ServiceError::Conflict("Not registered for this event".to_string())
            })?;

        event.attendees.remove(index);
        Ok(event.clone())
    })
}

/// Events the user organizes or attends.
pub fn events_for_user(tables: &Tables, user_id: &str) -> Vec<Event> {
    tables
        .events
        .iter()
        .filter(|e| e.organizer_id == user_id || e.attendees.iter().any(|a| a == user_id))
        .cloned()
        .collect()
}
