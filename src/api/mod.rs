pub mod auth;
pub mod caregivers;
pub mod chatbot;
pub mod communities;
pub mod events;
pub mod health;
pub mod posts;
pub mod study_groups;
pub mod swagger;
pub mod users;
