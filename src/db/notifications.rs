use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications;

/// Append a notification row. No uniqueness constraint: every transition
/// produces its own record.
pub async fn insert_notification<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    message: String,
) -> Result<notifications::Model, DbErr> {
    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        message: Set(message),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_notification.insert(db).await
}

/// Fetch a single notification by ID.
pub async fn get_notification_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    notifications::Entity::find_by_id(id).one(db).await
}

/// Fetch all notifications for a user, newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Count a user's unread notifications (derived, never stored).
pub async fn count_unread(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .count(db)
        .await
}

/// Flip the read flag on a notification.
pub async fn set_read(
    db: &DatabaseConnection,
    notification: notifications::Model,
) -> Result<notifications::Model, DbErr> {
    let mut active: notifications::ActiveModel = notification.into();
    active.is_read = Set(true);

    active.update(db).await
}

/// Delete all notifications for a user. Returns the number deleted;
/// deleting an empty feed is a no-op.
pub async fn delete_all_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    let result = notifications::Entity::delete_many()
        .filter(notifications::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
