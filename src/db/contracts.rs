use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::{self, Status};
use crate::models::{projects, proposals};

/// Insert the contract for an accepted proposal, status Active, parties
/// copied from the project (client) and proposal (freelancer).
pub async fn insert_contract<C: ConnectionTrait>(
    db: &C,
    proposal: &proposals::Model,
    project: &projects::Model,
) -> Result<contracts::Model, DbErr> {
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        proposal_id: Set(proposal.id),
        project_id: Set(project.id),
        client_id: Set(project.client_id),
        freelancer_id: Set(proposal.freelancer_id),
        status: Set(Status::Active),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_contract.insert(db).await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Fetch the contract created from a proposal, if any (one-to-one).
pub async fn find_by_proposal_id<C: ConnectionTrait>(
    db: &C,
    proposal_id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::ProposalId.eq(proposal_id))
        .one(db)
        .await
}

/// Fetch all contracts where the user is a party (either side), newest first.
pub async fn get_contracts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(
            Condition::any()
                .add(contracts::Column::ClientId.eq(user_id))
                .add(contracts::Column::FreelancerId.eq(user_id)),
        )
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Set the status of a contract.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    contract: contracts::Model,
    status: Status,
) -> Result<contracts::Model, DbErr> {
    let mut active: contracts::ActiveModel = contract.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
