use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use crate::db;
use crate::models::contracts::Status as ContractStatus;
use crate::models::notifications;

use super::LifecycleError;

/// Append a notification for `user_id`. The only failure mode beyond
/// storage is the target user not existing.
///
/// Generic over the connection so the accept transaction can enqueue the
/// acceptance notification atomically with the state change.
pub async fn notify<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    message: String,
) -> Result<notifications::Model, LifecycleError> {
    db::users::get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("User {user_id} not found")))?;

    Ok(db::notifications::insert_notification(db, user_id, message).await?)
}

/// Mark one of the actor's notifications as read and return their
/// remaining unread count.
pub async fn mark_read(
    db: &DatabaseConnection,
    notification_id: Uuid,
    actor_id: Uuid,
) -> Result<u64, LifecycleError> {
    let notification = db::notifications::get_notification_by_id(db, notification_id)
        .await?
        .ok_or_else(|| {
            LifecycleError::NotFound(format!("Notification {notification_id} not found"))
        })?;

    if notification.user_id != actor_id {
        return Err(LifecycleError::Unauthorized(
            "You can only mark your own notifications as read".to_string(),
        ));
    }

    if !notification.is_read {
        db::notifications::set_read(db, notification).await?;
    }

    Ok(db::notifications::count_unread(db, actor_id).await?)
}

/// Delete every notification belonging to the actor. Idempotent; returns
/// the number deleted.
pub async fn clear_all(db: &DatabaseConnection, actor_id: Uuid) -> Result<u64, LifecycleError> {
    Ok(db::notifications::delete_all_for_user(db, actor_id).await?)
}

// ── Message builders ──

pub fn proposal_submitted(project_title: &str) -> String {
    format!("A new proposal arrived on '{project_title}'.")
}

pub fn proposal_accepted(project_title: &str) -> String {
    format!("Your proposal for '{project_title}' was ACCEPTED.")
}

pub fn proposal_rejected(project_title: &str) -> String {
    format!("Your proposal for '{project_title}' was rejected.")
}

pub fn contract_closed(project_title: &str, status: ContractStatus) -> String {
    match status {
        ContractStatus::Completed => {
            format!("Your contract for '{project_title}' was marked completed.")
        }
        ContractStatus::Cancelled => {
            format!("Your contract for '{project_title}' was cancelled.")
        }
        ContractStatus::Active => {
            format!("Your contract for '{project_title}' is active.")
        }
    }
}

pub fn chat_message(sender_name: &str) -> String {
    format!("New chat message from {sender_name}.")
}
