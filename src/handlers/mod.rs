pub mod auth;
pub mod chat;
pub mod contracts;
pub mod notifications;
pub mod profiles;
pub mod projects;
pub mod proposals;
pub mod reviews;
pub mod users;

use actix_web::{web, HttpResponse};

use crate::lifecycle::LifecycleError;

/// Map a lifecycle engine failure onto the HTTP response the caller sees.
pub fn lifecycle_error_response(err: &LifecycleError) -> HttpResponse {
    match err {
        LifecycleError::Unauthorized(_) => HttpResponse::Forbidden().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::InvalidState(_) | LifecycleError::Conflict(_) => {
            HttpResponse::Conflict().json(serde_json::json!({
                "error": err.to_string(),
            }))
        }
        LifecycleError::Validation(_) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string(),
        })),
        LifecycleError::Db(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (register/login are public, /me requires a JWT) ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes ──
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Profile routes ──
    cfg.service(web::resource("/profiles/me").route(web::put().to(profiles::update_my_profile)));
    cfg.service(
        web::resource("/profiles/{user_id}").route(web::get().to(profiles::get_profile)),
    );

    // ── Project routes (incl. nested proposals and reviews) ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/mine", web::get().to(projects::get_my_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project))
            .route("/{id}/proposals", web::post().to(proposals::submit_proposal))
            .route("/{id}/proposals", web::get().to(proposals::get_proposals_by_project))
            .route("/{id}/reviews", web::post().to(reviews::create_review))
            .route("/{id}/reviews", web::get().to(reviews::get_reviews)),
    );

    // ── Proposal lifecycle routes ──
    cfg.service(
        web::scope("/proposals")
            .route("/mine", web::get().to(proposals::get_my_proposals))
            .route("/{id}/accept", web::post().to(proposals::accept_proposal))
            .route("/{id}/reject", web::post().to(proposals::reject_proposal)),
    );

    // ── Contract routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}/complete", web::post().to(contracts::complete_contract))
            .route("/{id}/cancel", web::post().to(contracts::cancel_contract)),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route("", web::delete().to(notifications::clear_notifications))
            .route("/{id}/read", web::put().to(notifications::mark_notification_read)),
    );

    // ── Chat routes (REST history + WebSocket) ──
    cfg.service(
        web::scope("/chat")
            .route("/ws/{contract_id}", web::get().to(crate::chat::session::ws_connect))
            .route("/{contract_id}/messages", web::get().to(chat::get_messages))
            .route("/{contract_id}/read", web::put().to(chat::mark_all_read))
            .route("/{contract_id}/clear", web::post().to(chat::clear_chat)),
    );
}
