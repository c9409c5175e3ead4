//! In-memory record store with flat-file JSON persistence.
//!
//! All six collections live in memory for the process lifetime, one
//! pretty-printed JSON array per file. Every mutation rewrites every file
//! wholesale before the HTTP response goes out; there is no append log and
//! no atomic rename, so a crash mid-write can corrupt a file and a crash
//! between mutate and flush loses the mutation. Acceptable for a
//! single-process, low-concurrency deployment; anything more needs a real
//! storage engine.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Caregiver, Community, Event, Post, StudyGroup, User};
use crate::utils::ServiceError;

const USERS_FILE: &str = "users.json";
const EVENTS_FILE: &str = "events.json";
const COMMUNITIES_FILE: &str = "communities.json";
const CAREGIVERS_FILE: &str = "caregivers.json";
const STUDY_GROUPS_FILE: &str = "study-groups.json";
const POSTS_FILE: &str = "posts.json";

/// The record collections. Cross-references between them are by id only.
#[derive(Debug, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub communities: Vec<Community>,
    pub caregivers: Vec<Caregiver>,
    pub study_groups: Vec<StudyGroup>,
    pub posts: Vec<Post>,
}

impl Tables {
    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }
}

/// Process-wide store handed to handlers as shared state.
///
/// A single reader/writer guard over all tables makes each
/// mutate-then-persist sequence atomic with respect to other mutations.
pub struct Store {
    data_dir: PathBuf,
    tables: RwLock<Tables>,
}

impl Store {
    /// Loads every collection from `data_dir`. A missing or unreadable
    /// file yields an empty collection, never a startup failure.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if let Err(e) = fs::create_dir_all(&data_dir) {
            log::warn!("⚠️ Could not create data dir {}: {}", data_dir.display(), e);
        }

        let tables = Tables {
            users: load_collection(&data_dir.join(USERS_FILE)),
            events: load_collection(&data_dir.join(EVENTS_FILE)),
            communities: load_collection(&data_dir.join(COMMUNITIES_FILE)),
            caregivers: load_collection(&data_dir.join(CAREGIVERS_FILE)),
            study_groups: load_collection(&data_dir.join(STUDY_GROUPS_FILE)),
            posts: load_collection(&data_dir.join(POSTS_FILE)),
        };

        log::info!(
            "📦 Store loaded: {} users, {} events, {} communities, {} caregivers, {} study groups, {} posts",
            tables.users.len(),
            tables.events.len(),
            tables.communities.len(),
            tables.caregivers.len(),
            tables.study_groups.len(),
            tables.posts.len(),
        );

        Store {
            data_dir,
            tables: RwLock::new(tables),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs a mutation under the write guard and, if it succeeds, flushes
    /// every collection to disk before the guard is released. A flush
    /// failure is logged and never fails the request, so in-memory and
    /// on-disk state can diverge silently.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut tables = self.write();
        let result = f(&mut tables)?;
        self.persist(&tables);
        Ok(result)
    }

    fn persist(&self, tables: &Tables) {
        save_collection(&self.data_dir.join(USERS_FILE), &tables.users);
        save_collection(&self.data_dir.join(EVENTS_FILE), &tables.events);
        save_collection(&self.data_dir.join(COMMUNITIES_FILE), &tables.communities);
        save_collection(&self.data_dir.join(CAREGIVERS_FILE), &tables.caregivers);
        save_collection(&self.data_dir.join(STUDY_GROUPS_FILE), &tables.study_groups);
        save_collection(&self.data_dir.join(POSTS_FILE), &tables.posts);
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("⚠️ Could not parse {}: {} — starting empty", path.display(), e);
                Vec::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            log::warn!("⚠️ Could not read {}: {} — starting empty", path.display(), e);
            Vec::new()
        }
    }
}

fn save_collection<T: Serialize>(path: &Path, records: &[T]) {
    let json = match serde_json::to_string_pretty(records) {
        Ok(json) => json,
        Err(e) => {
            log::error!("❌ Could not serialize {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = fs::write(path, json) {
        log::error!("❌ Could not write {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Mei Lin".to_string(),
            email: email.to_string(),
            password: Some("$2b$12$hash".to_string()),
            phone: None,
            area: Some("Bishan".to_string()),
            bio: None,
            age: Some(64),
            interests: vec!["gardening".to_string()],
            hobbies: vec![],
            location: None,
            waves: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_files_load_as_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        let tables = store.read();
        assert!(tables.users.is_empty());
        assert!(tables.events.is_empty());
        assert!(tables.posts.is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(USERS_FILE), "{not json").unwrap();
        let store = Store::open(dir.path());
        assert!(store.read().users.is_empty());
    }

    #[test]
    fn mutation_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Store::open(dir.path());
            store
                .update(|tables| {
                    tables.users.push(sample_user("u1", "mei@example.com"));
                    Ok(())
                })
                .unwrap();
        }

        let reopened = Store::open(dir.path());
        let tables = reopened.read();
        assert_eq!(tables.users.len(), 1);
        let user = &tables.users[0];
        assert_eq!(user.id, "u1");
        assert_eq!(user.email, "mei@example.com");
        assert_eq!(user.age, Some(64));
        assert_eq!(user.interests, vec!["gardening".to_string()]);
        assert_eq!(user.password.as_deref(), Some("$2b$12$hash"));
    }

    #[test]
    fn failed_update_does_not_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path());
        let result: Result<(), ServiceError> = store.update(|tables| {
            tables.users.push(sample_user("u1", "mei@example.com"));
            Err(ServiceError::Conflict("nope".to_string()))
        });
        assert!(result.is_err());
        // the write itself is rolled forward in memory but never flushed
        assert!(!dir.path().join(USERS_FILE).exists());
    }

    #[test]
    fn old_records_read_with_defaults() {
        // waves/hobbies absent in pre-existing data must default to empty
        let dir = tempfile::tempdir().unwrap();
        let raw = r#"[{
            "id": "u9",
            "name": "Tan Ah Kow",
            "email": "tan@example.com",
            "createdAt": "2024-01-15T08:30:00Z"
        }]"#;
        fs::write(dir.path().join(USERS_FILE), raw).unwrap();
        let store = Store::open(dir.path());
        let tables = store.read();
        assert_eq!(tables.users.len(), 1);
        assert!(tables.users[0].waves.is_empty());
        assert!(tables.users[0].hobbies.is_empty());
        assert!(tables.users[0].password.is_none());
    }
}
