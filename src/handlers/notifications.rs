use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::handlers::lifecycle_error_response;
use crate::lifecycle;
use crate::models::notifications::NotificationFeed;

/// GET /api/notifications — the authenticated user's feed, newest first,
/// with the derived unread count.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let user_id = user.0.id;

    let notifications = match notification_db::get_notifications_for_user(db.get_ref(), user_id)
        .await
    {
        Ok(n) => n,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match notification_db::count_unread(db.get_ref(), user_id).await {
        Ok(unread_count) => HttpResponse::Ok().json(NotificationFeed {
            notifications,
            unread_count,
        }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/notifications/{id}/read — mark one notification read.
/// Responds with the remaining unread count.
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let notification_id = path.into_inner();

    match lifecycle::notifications::mark_read(db.get_ref(), notification_id, user.0.id).await {
        Ok(unread_count) => HttpResponse::Ok().json(serde_json::json!({
            "unread_count": unread_count,
        })),
        Err(e) => lifecycle_error_response(&e),
    }
}

/// DELETE /api/notifications — clear the authenticated user's feed.
pub async fn clear_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match lifecycle::notifications::clear_all(db.get_ref(), user.0.id).await {
        Ok(deleted) => HttpResponse::Ok().json(serde_json::json!({
            "deleted": deleted,
        })),
        Err(e) => lifecycle_error_response(&e),
    }
}
