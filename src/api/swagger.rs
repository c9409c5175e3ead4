use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Community Service API",
        version = "1.0.0",
        description = "Community platform API: events, communities, peer matching, caregivers, study groups, posts and a rule-based assistant.\n\n**Authentication:** Mutating endpoints require a JWT Bearer token from /api/auth/login."
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::get_me,

        // Health
        crate::api::health::health_check,

        // Peers & users
        crate::api::users::get_all_peers,
        crate::api::users::match_peers,
        crate::api::users::send_wave,
        crate::api::users::update_user,

        // Events
        crate::api::events::get_events,
        crate::api::events::create_event,
        crate::api::events::rsvp,

        // Communities
        crate::api::communities::create_community,
        crate::api::communities::join_community,

        // Caregivers
        crate::api::caregivers::get_caregivers,
        crate::api::caregivers::get_nearby_caregivers,
        crate::api::caregivers::register_caregiver,

        // Study groups
        crate::api::study_groups::create_group,
        crate::api::study_groups::join_group,

        // Posts
        crate::api::posts::create_post,
        crate::api::posts::like_post,

        // Chatbot
        crate::api::chatbot::chat,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::peer_service::PeerFilter,
            crate::services::peer_service::PeerMatch,
            crate::services::peer_service::WaveRequest,
            crate::services::post_service::LikeResponse,
            crate::api::health::HealthResponse,
            crate::api::chatbot::ChatRequest,
            crate::models::UpdateProfileRequest,
            crate::models::CreateEventRequest,
            crate::models::CreateCommunityRequest,
            crate::models::RegisterCaregiverRequest,
            crate::models::CaregiverWithDistance,
            crate::models::CreateStudyGroupRequest,
            crate::models::CreatePostRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the current-user profile."),
        (name = "Peers", description = "Peer directory, proximity/interest matching and waves."),
        (name = "Users", description = "Public profiles and self-service profile updates."),
        (name = "Events", description = "Event listing, creation and RSVPs."),
        (name = "Communities", description = "Community listing, membership join/leave."),
        (name = "Caregivers", description = "Caregiver directory, nearby search and profile feed."),
        (name = "StudyGroups", description = "Study groups: membership, posts and meetings."),
        (name = "Posts", description = "Community feed: posts, likes and comments."),
        (name = "Chatbot", description = "Rule-based assistant answering platform questions."),
        (name = "Health", description = "Service health for monitoring."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
