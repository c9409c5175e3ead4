use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::GeoPoint;

/// Community event (events.json)
///
/// `date` is a calendar date and `time` a local clock time, both kept as
/// plain strings with no timezone, exactly as entered by the organizer.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    /// Free-text venue description
    pub location: String,
    pub category: String,
    /// None = unlimited capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    pub organizer_id: String,
    /// RSVP order preserved; ids are unique
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    /// Set when registration happens on a third-party page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) => self.attendees.len() >= max as usize,
            None => false,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub category: String,
    pub max_attendees: Option<u32>,
    pub community_id: Option<String>,
    pub coordinates: Option<GeoPoint>,
    pub external_url: Option<String>,
}

/// Query filters for the event listing
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}
