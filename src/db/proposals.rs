use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::proposals::{self, Status, SubmitProposal};

/// Insert a new proposal with status Pending.
pub async fn insert_proposal<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
    input: SubmitProposal,
) -> Result<proposals::Model, DbErr> {
    let new_proposal = proposals::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        freelancer_id: Set(freelancer_id),
        bid_amount: Set(input.bid_amount),
        cover_letter: Set(input.cover_letter),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_proposal.insert(db).await
}

/// Rewrite an existing proposal's bid and cover letter, resetting it to
/// Pending (the resubmission path).
pub async fn resubmit_proposal<C: ConnectionTrait>(
    db: &C,
    proposal: proposals::Model,
    input: SubmitProposal,
) -> Result<proposals::Model, DbErr> {
    let mut active: proposals::ActiveModel = proposal.into();
    active.bid_amount = Set(input.bid_amount);
    active.cover_letter = Set(input.cover_letter);
    active.status = Set(Status::Pending);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Fetch a single proposal by ID.
pub async fn get_proposal_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find_by_id(id).one(db).await
}

/// Fetch the unique proposal for a (project, freelancer) pair, if any.
pub async fn find_by_project_and_freelancer<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await
}

/// Fetch all proposals on a project, newest first.
pub async fn get_proposals_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ProjectId.eq(project_id))
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all proposals submitted by a freelancer, newest first.
pub async fn get_proposals_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await
}

/// Set the status of a proposal.
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    proposal: proposals::Model,
    status: Status,
) -> Result<proposals::Model, DbErr> {
    let mut active: proposals::ActiveModel = proposal.into();
    active.status = Set(status);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Reject every Pending sibling of the accepted proposal in one statement.
/// Returns the number of rows touched.
pub async fn reject_pending_siblings<C: ConnectionTrait>(
    db: &C,
    project_id: Uuid,
    accepted_id: Uuid,
) -> Result<u64, DbErr> {
    let result = proposals::Entity::update_many()
        .col_expr(proposals::Column::Status, Expr::value(Status::Rejected))
        .col_expr(
            proposals::Column::UpdatedAt,
            Expr::value(Some(chrono::Utc::now())),
        )
        .filter(proposals::Column::ProjectId.eq(project_id))
        .filter(proposals::Column::Id.ne(accepted_id))
        .filter(proposals::Column::Status.eq(Status::Pending))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
