use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PublicUser, User, Wave};
use crate::store::{Store, Tables};
use crate::utils::{geo, ServiceError};

fn default_min_age() -> u32 {
    18
}
fn default_max_age() -> u32 {
    99
}
fn default_distance_km() -> f64 {
    10.0
}

/// Hard constraints applied before scoring. An empty interest list means
/// no interest constraint.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeerFilter {
    #[serde(default = "default_min_age")]
    pub min_age: u32,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    #[serde(default = "default_distance_km")]
    pub distance_km: f64,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Default for PeerFilter {
    fn default() -> Self {
        PeerFilter {
            min_age: default_min_age(),
            max_age: default_max_age(),
            distance_km: default_distance_km(),
            interests: vec![],
        }
    }
}

/// A matched candidate with its distance from the requester and heuristic
/// ranking score.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeerMatch {
    #[serde(flatten)]
    pub peer: PublicUser,
    /// km from the requester
    pub distance: f64,
    pub match_score: i64,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaveRequest {
    pub to_peer_id: String,
    #[serde(default)]
    pub message: String,
}

/// Ranking score for a candidate relative to the requester:
/// 3 per shared interest, up to 10 for age similarity (only when both ages
/// are known), up to 20 for proximity. The proximity term zeroes out
/// beyond 10 km.
fn match_score(requester: &User, candidate: &User, distance: f64) -> i64 {
    let mut score = 0.0;

    let shared = requester
        .interests
        .iter()
        .filter(|i| candidate.interests.contains(i))
        .count();
    score += shared as f64 * 3.0;

    if let (Some(a), Some(b)) = (requester.age, candidate.age) {
        let age_diff = (a as f64 - b as f64).abs();
        score += (10.0 - age_diff).max(0.0);
    }

    score += ((10.0 - distance) * 2.0).max(0.0);

    score.round() as i64
}

/// Filters the full user set down to matching candidates for `user_id`,
/// scores them, and ranks them best-first. Candidates keep their discovery
/// order on equal scores.
pub fn match_peers(
    tables: &Tables,
    user_id: &str,
    filter: &PeerFilter,
) -> Result<Vec<PeerMatch>, ServiceError> {
    let requester = tables
        .user_by_id(user_id)
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;
    let origin = requester.location.ok_or(ServiceError::LocationRequired)?;

    let mut matches: Vec<PeerMatch> = Vec::new();
    for peer in &tables.users {
        // never match with self
        if peer.id == requester.id {
            continue;
        }

        let location = match peer.location {
            Some(loc) => loc,
            None => continue,
        };

        // age window only constrains candidates that declare an age
        if let Some(age) = peer.age {
            if age < filter.min_age || age > filter.max_age {
                continue;
            }
        }

        // NaN distances fail this check and drop out here
        let distance = geo::distance_km(&origin, &location);
        if !(distance <= filter.distance_km) {
            continue;
        }

        if !filter.interests.is_empty() {
            let overlaps = filter
                .interests
                .iter()
                .any(|i| peer.interests.contains(i));
            if !overlaps {
                continue;
            }
        }

        matches.push(PeerMatch {
            peer: PublicUser::from(peer),
            distance,
            match_score: match_score(requester, peer, distance),
        });
    }

    // stable: equal scores keep discovery order
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    Ok(matches)
}

/// All users minus passwords, for the client-side matching view.
pub fn all_peers(tables: &Tables) -> Vec<PublicUser> {
    tables.users.iter().map(PublicUser::from).collect()
}

/// Appends a wave to the recipient's inbox and persists.
pub fn send_wave(store: &Store, from_id: &str, request: &WaveRequest) -> Result<(), ServiceError> {
    store.update(|tables| {
        let from_name = tables
            .user_by_id(from_id)
            .map(|u| u.name.clone())
            .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

        let recipient = tables
            .users
            .iter_mut()
            .find(|u| u.id == request.to_peer_id)
            .ok_or_else(|| ServiceError::NotFound("Peer not found".to_string()))?;

        recipient.waves.push(Wave {
            id: Uuid::new_v4().to_string(),
            from: from_id.to_string(),
            from_name,
            message: request.message.clone(),
            timestamp: Utc::now(),
            read: false,
        });
        Ok(())
    })
}

/// The requester's inbound waves.
pub fn received_waves(tables: &Tables, user_id: &str) -> Result<Vec<Wave>, ServiceError> {
    tables
        .user_by_id(user_id)
        .map(|u| u.waves.clone())
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))
}
