use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews::{self, CreateReview};

/// Insert a review on a project.
pub async fn insert_review(
    db: &DatabaseConnection,
    project_id: Uuid,
    reviewer_id: Uuid,
    input: CreateReview,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        reviewer_id: Set(reviewer_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

/// Fetch all reviews on a project, newest first.
pub async fn get_reviews_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::ProjectId.eq(project_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
