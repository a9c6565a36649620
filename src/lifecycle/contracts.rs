use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db;
use crate::models::contracts::{self, Status};

use super::notifications::{self, notify};
use super::{ensure_contract_party, LifecycleError};

/// Mark an active contract completed. Either party may do this.
pub async fn complete(
    db: &DatabaseConnection,
    contract_id: Uuid,
    actor_id: Uuid,
) -> Result<contracts::Model, LifecycleError> {
    transition(db, contract_id, actor_id, Status::Completed).await
}

/// Cancel an active contract. Either party may do this.
pub async fn cancel(
    db: &DatabaseConnection,
    contract_id: Uuid,
    actor_id: Uuid,
) -> Result<contracts::Model, LifecycleError> {
    transition(db, contract_id, actor_id, Status::Cancelled).await
}

async fn transition(
    db: &DatabaseConnection,
    contract_id: Uuid,
    actor_id: Uuid,
    to: Status,
) -> Result<contracts::Model, LifecycleError> {
    let contract = db::contracts::get_contract_by_id(db, contract_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Contract {contract_id} not found")))?;

    ensure_contract_party(&contract, actor_id)?;

    if contract.status != Status::Active {
        return Err(LifecycleError::InvalidState(format!(
            "Contract is already {:?} and cannot change state",
            contract.status
        )));
    }

    let other_party = contract.other_party(actor_id);

    let project = db::projects::get_project_by_id(db, contract.project_id)
        .await?
        .ok_or_else(|| {
            LifecycleError::NotFound(format!("Project {} not found", contract.project_id))
        })?;

    let updated = db::contracts::set_status(db, contract, to).await?;

    notify(
        db,
        other_party,
        notifications::contract_closed(&project.title, to),
    )
    .await?;

    Ok(updated)
}
