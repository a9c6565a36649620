use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys};
use crate::db::profiles as profile_db;
use crate::models::profiles::UpdateProfile;

/// GET /api/profiles/{user_id} — a user's public marketplace profile.
pub async fn get_profile(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let user_id = path.into_inner();
    let cache_key = keys::profile(&user_id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => HttpResponse::Ok().json(cached),
        Ok(None) => match profile_db::get_profile_by_user_id(db.get_ref(), user_id).await {
            Ok(Some(profile)) => {
                let _ = cache.set(&cache_key, &profile, Some(900)).await;
                HttpResponse::Ok().json(profile)
            }
            Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Profile for user {user_id} not found"),
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        Err(e) => {
            tracing::warn!("Cache error: {}", e);
            match profile_db::get_profile_by_user_id(db.get_ref(), user_id).await {
                Ok(Some(profile)) => HttpResponse::Ok().json(profile),
                Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Profile for user {user_id} not found"),
                })),
                Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                })),
            }
        }
    }
}

/// PUT /api/profiles/me — update the authenticated user's own profile.
pub async fn update_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<UpdateProfile>,
) -> impl Responder {
    let user_id = user.0.id;

    match profile_db::update_profile(db.get_ref(), user_id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::profile(&user_id.to_string())).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => {
            let mut status = if e.to_string().contains("not found") {
                HttpResponse::NotFound()
            } else {
                HttpResponse::InternalServerError()
            };
            status.json(serde_json::json!({
                "error": format!("Failed to update profile: {e}"),
            }))
        }
    }
}
