use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::db;
use crate::models::contracts;
use crate::models::profiles::Roles;
use crate::models::proposals::{self, Status, SubmitProposal};

use super::notifications::{self, notify};
use super::{ensure_project_client, is_serialization_conflict, LifecycleError};

/// Submit (or resubmit) a proposal on a project.
///
/// One proposal per (project, freelancer): a resubmission rewrites the bid
/// and cover letter and resets the status to Pending. An accepted proposal
/// is terminal and cannot be resubmitted.
pub async fn submit(
    db: &DatabaseConnection,
    project_id: Uuid,
    actor_id: Uuid,
    input: SubmitProposal,
) -> Result<proposals::Model, LifecycleError> {
    if input.bid_amount <= Decimal::ZERO {
        return Err(LifecycleError::Validation(
            "Bid amount must be positive".to_string(),
        ));
    }

    let profile = db::profiles::get_profile_by_user_id(db, actor_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Profile for user {actor_id} not found")))?;

    if profile.role != Roles::Freelancer {
        return Err(LifecycleError::Unauthorized(
            "Only freelancers can submit proposals".to_string(),
        ));
    }

    let project = db::projects::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Project {project_id} not found")))?;

    if project.client_id == actor_id {
        return Err(LifecycleError::Unauthorized(
            "You cannot bid on your own project".to_string(),
        ));
    }

    let proposal =
        match db::proposals::find_by_project_and_freelancer(db, project_id, actor_id).await? {
            Some(existing) if existing.status == Status::Accepted => {
                return Err(LifecycleError::InvalidState(
                    "This proposal was already accepted".to_string(),
                ));
            }
            Some(existing) => db::proposals::resubmit_proposal(db, existing, input).await?,
            None => db::proposals::insert_proposal(db, project_id, actor_id, input).await?,
        };

    notify(
        db,
        project.client_id,
        notifications::proposal_submitted(&project.title),
    )
    .await?;

    Ok(proposal)
}

/// Accept a proposal: mark it Accepted, reject its pending siblings, and
/// get-or-create the contract — all in one transaction serialized on the
/// project row. Re-accepting an already-accepted proposal returns the
/// existing contract.
pub async fn accept(
    db: &DatabaseConnection,
    proposal_id: Uuid,
    actor_id: Uuid,
) -> Result<contracts::Model, LifecycleError> {
    match try_accept(db, proposal_id, actor_id).await {
        Err(LifecycleError::Db(err)) if is_serialization_conflict(&err) => {
            tracing::warn!(
                "accept on proposal {proposal_id} hit a serialization conflict, retrying once"
            );
            try_accept(db, proposal_id, actor_id)
                .await
                .map_err(|e| match e {
                    LifecycleError::Db(err) if is_serialization_conflict(&err) => {
                        LifecycleError::Conflict(
                            "This project's proposals are being updated concurrently".to_string(),
                        )
                    }
                    other => other,
                })
        }
        other => other,
    }
}

async fn try_accept(
    db: &DatabaseConnection,
    proposal_id: Uuid,
    actor_id: Uuid,
) -> Result<contracts::Model, LifecycleError> {
    let result = db
        .transaction::<_, contracts::Model, LifecycleError>(|txn| {
            Box::pin(async move {
                let proposal = db::proposals::get_proposal_by_id(txn, proposal_id)
                    .await?
                    .ok_or_else(|| {
                        LifecycleError::NotFound(format!("Proposal {proposal_id} not found"))
                    })?;

                // Lock the project row before touching any proposal: a
                // concurrent accept on a sibling blocks here and then sees
                // the terminal state this transaction leaves behind.
                let project = db::projects::get_project_for_update(txn, proposal.project_id)
                    .await?
                    .ok_or_else(|| {
                        LifecycleError::NotFound(format!(
                            "Project {} not found",
                            proposal.project_id
                        ))
                    })?;

                ensure_project_client(&project, actor_id)?;

                let accepted = match proposal.status {
                    Status::Rejected => {
                        return Err(LifecycleError::InvalidState(
                            "A rejected proposal cannot be accepted".to_string(),
                        ));
                    }
                    Status::Accepted => proposal,
                    Status::Pending => {
                        let accepted =
                            db::proposals::set_status(txn, proposal, Status::Accepted).await?;
                        db::proposals::reject_pending_siblings(
                            txn,
                            accepted.project_id,
                            accepted.id,
                        )
                        .await?;
                        accepted
                    }
                };

                // Get-or-create keyed on the proposal: the second accept of
                // the same proposal lands here and returns the original
                // contract without a second notification.
                if let Some(existing) = db::contracts::find_by_proposal_id(txn, accepted.id).await?
                {
                    return Ok(existing);
                }

                let contract = db::contracts::insert_contract(txn, &accepted, &project).await?;

                notify(
                    txn,
                    contract.freelancer_id,
                    notifications::proposal_accepted(&project.title),
                )
                .await?;

                Ok(contract)
            })
        })
        .await;

    result.map_err(LifecycleError::from)
}

/// Reject a proposal. Accepted proposals are terminal; rejecting an
/// already-rejected proposal is a no-op.
pub async fn reject(
    db: &DatabaseConnection,
    proposal_id: Uuid,
    actor_id: Uuid,
) -> Result<proposals::Model, LifecycleError> {
    let proposal = db::proposals::get_proposal_by_id(db, proposal_id)
        .await?
        .ok_or_else(|| LifecycleError::NotFound(format!("Proposal {proposal_id} not found")))?;

    let project = db::projects::get_project_by_id(db, proposal.project_id)
        .await?
        .ok_or_else(|| {
            LifecycleError::NotFound(format!("Project {} not found", proposal.project_id))
        })?;

    ensure_project_client(&project, actor_id)?;

    match proposal.status {
        Status::Accepted => Err(LifecycleError::InvalidState(
            "An accepted proposal cannot be rejected".to_string(),
        )),
        Status::Rejected => Ok(proposal),
        Status::Pending => {
            let rejected = db::proposals::set_status(db, proposal, Status::Rejected).await?;

            notify(
                db,
                rejected.freelancer_id,
                notifications::proposal_rejected(&project.title),
            )
            .await?;

            Ok(rejected)
        }
    }
}
