use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use crate::models::chat_clears;

/// Upsert the clear marker for (user, contract) to now.
pub async fn set_cleared(
    db: &DatabaseConnection,
    user_id: Uuid,
    contract_id: Uuid,
) -> Result<chrono::DateTime<chrono::Utc>, DbErr> {
    let cleared_at = chrono::Utc::now();

    let marker = chat_clears::ActiveModel {
        user_id: Set(user_id),
        contract_id: Set(contract_id),
        cleared_at: Set(cleared_at),
    };

    chat_clears::Entity::insert(marker)
        .on_conflict(
            OnConflict::columns([
                chat_clears::Column::UserId,
                chat_clears::Column::ContractId,
            ])
            .update_column(chat_clears::Column::ClearedAt)
            .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(cleared_at)
}

/// Fetch the clear marker for (user, contract), if one was ever set.
pub async fn get_cleared_at(
    db: &DatabaseConnection,
    user_id: Uuid,
    contract_id: Uuid,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, DbErr> {
    let marker = chat_clears::Entity::find_by_id((user_id, contract_id))
        .one(db)
        .await?;

    Ok(marker.map(|m| m.cleared_at))
}
