pub mod auth_service;
pub mod caregiver_service;
pub mod chatbot_service;
pub mod community_service;
pub mod event_service;
pub mod peer_service;
pub mod post_service;
pub mod study_group_service;
pub mod user_service;
