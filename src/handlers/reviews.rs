use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::{projects as project_db, reviews as review_db};
use crate::models::reviews::CreateReview;

/// POST /api/projects/{id}/reviews — leave a review on a project.
pub async fn create_review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<CreateReview>,
) -> impl Responder {
    let project_id = path.into_inner();
    let input = body.into_inner();

    if !(1..=5).contains(&input.rating) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Rating must be between 1 and 5",
        }));
    }

    match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Project {project_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match review_db::insert_review(db.get_ref(), project_id, user.0.id, input).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create review: {e}"),
        })),
    }
}

/// GET /api/projects/{id}/reviews — all reviews on a project.
pub async fn get_reviews(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();

    match review_db::get_reviews_by_project(db.get_ref(), project_id).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
