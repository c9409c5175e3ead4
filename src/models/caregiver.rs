use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caregiver profile (caregivers.json)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Caregiver {
    pub id: String,
    /// Owning user; only they may edit the profile
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Community rating; not recomputed from any review entity here
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub verified: bool,
    pub location: CaregiverLocation,
    /// Newest first
    #[serde(default)]
    pub updates: Vec<CaregiverUpdate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CaregiverLocation {
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

/// Short status entry on a caregiver's profile feed
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CaregiverUpdate {
    pub id: String,
    pub date: String,
    pub message: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCaregiverRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub services: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<String>,
    pub location: Option<CaregiverLocation>,
    pub experience: Option<String>,
    pub certifications: Option<Vec<String>>,
}

/// Mutable caregiver fields. Never id, creation time, rating or reviews.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaregiverRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub services: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<String>,
    pub location: Option<CaregiverLocation>,
    pub experience: Option<String>,
    pub certifications: Option<Vec<String>>,
}

/// Query filters for the caregiver listing
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverQuery {
    pub area: Option<String>,
    pub service: Option<String>,
    pub min_rating: Option<f64>,
}

/// Listing entry for the nearby search, distance in km from the caller
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CaregiverWithDistance {
    #[serde(flatten)]
    pub caregiver: Caregiver,
    pub distance: f64,
}
