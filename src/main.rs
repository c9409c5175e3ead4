mod api;
mod middleware;
mod models;
mod services;
mod store;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    log::info!("🚀 Starting Community Service...");
    log::info!("💾 Data directory: {}", data_dir);

    // Load all collections into memory; missing files start empty
    let store = web::Data::new(store::Store::open(&data_dir));

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth endpoints
            .service(
                web::scope("/api/auth")
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    .service(
                        web::resource("/me")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::get().to(api::auth::get_me)),
                    ),
            )
            // ==================== USERS & PEER MATCHING ====================
            .service(
                web::scope("/api/users")
                    // Fixed paths must come before the /{id} catch-alls
                    .service(
                        web::resource("/peers/all")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::get().to(api::users::get_all_peers)),
                    )
                    .service(
                        web::resource("/peers/match")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::users::match_peers)),
                    )
                    .service(
                        web::resource("/wave")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::users::send_wave)),
                    )
                    .service(
                        web::resource("/waves")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::get().to(api::users::get_waves)),
                    )
                    .route("/{id}", web::get().to(api::users::get_user))
                    .service(
                        web::resource("/{id}")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::put().to(api::users::update_user)),
                    )
                    .route("/{id}/events", web::get().to(api::users::get_user_events))
                    .route(
                        "/{id}/communities",
                        web::get().to(api::users::get_user_communities),
                    ),
            )
            // ==================== EVENTS ====================
            .service(
                web::scope("/api/events")
                    .route("", web::get().to(api::events::get_events))
                    .service(
                        web::resource("")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::events::create_event)),
                    )
                    .route("/{id}", web::get().to(api::events::get_event))
                    .service(
                        web::resource("/{id}/rsvp")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::events::rsvp))
                            .route(web::delete().to(api::events::cancel_rsvp)),
                    ),
            )
            // ==================== COMMUNITIES ====================
            .service(
                web::scope("/api/communities")
                    .route("", web::get().to(api::communities::get_communities))
                    .service(
                        web::resource("")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::communities::create_community)),
                    )
                    .route("/{id}", web::get().to(api::communities::get_community))
                    .service(
                        web::resource("/{id}/join")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::communities::join_community)),
                    )
                    .service(
                        web::resource("/{id}/leave")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::communities::leave_community)),
                    ),
            )
            // ==================== CAREGIVERS ====================
            .service(
                web::scope("/api/caregivers")
                    .route("", web::get().to(api::caregivers::get_caregivers))
                    .route(
                        "/nearby/{lat}/{lng}",
                        web::get().to(api::caregivers::get_nearby_caregivers),
                    )
                    .service(
                        web::resource("/register")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::caregivers::register_caregiver)),
                    )
                    .route("/{id}", web::get().to(api::caregivers::get_caregiver))
                    .service(
                        web::resource("/{id}")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::put().to(api::caregivers::update_caregiver)),
                    )
                    .service(
                        web::resource("/{id}/updates")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::caregivers::add_caregiver_update)),
                    )
                    .service(
                        web::resource("/{id}/contact")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::caregivers::contact_caregiver)),
                    ),
            )
            // ==================== STUDY GROUPS ====================
            .service(
                web::scope("/api/study-groups")
                    .wrap(middleware::AuthMiddleware)
                    .route("", web::get().to(api::study_groups::get_groups))
                    .route("", web::post().to(api::study_groups::create_group))
                    .route("/{id}", web::get().to(api::study_groups::get_group))
                    .route("/{id}/join", web::post().to(api::study_groups::join_group))
                    .route("/{id}/leave", web::post().to(api::study_groups::leave_group))
                    .route("/{id}/posts", web::post().to(api::study_groups::add_group_post))
                    .route("/{id}/posts", web::get().to(api::study_groups::get_group_posts))
                    .route(
                        "/{id}/meetings",
                        web::post().to(api::study_groups::schedule_meeting),
                    )
                    .route(
                        "/{id}/meetings",
                        web::get().to(api::study_groups::get_group_meetings),
                    ),
            )
            // ==================== POSTS ====================
            .service(
                web::scope("/api/posts")
                    .route("", web::get().to(api::posts::get_posts))
                    .service(
                        web::resource("")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::posts::create_post)),
                    )
                    .route("/{id}", web::get().to(api::posts::get_post))
                    .service(
                        web::resource("/{id}")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::delete().to(api::posts::delete_post)),
                    )
                    .service(
                        web::resource("/{id}/like")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::posts::like_post)),
                    )
                    .service(
                        web::resource("/{id}/comment")
                            .wrap(middleware::AuthMiddleware)
                            .route(web::post().to(api::posts::comment_on_post)),
                    ),
            )
            // ==================== CHATBOT ====================
            .service(
                web::scope("/api/chatbot").route("/chat", web::post().to(api::chatbot::chat)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
