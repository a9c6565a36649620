use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::{projects as project_db, proposals as proposal_db};
use crate::handlers::lifecycle_error_response;
use crate::lifecycle;
use crate::models::proposals::SubmitProposal;

/// POST /api/projects/{id}/proposals — submit (or resubmit) a bid.
///
/// The freelancer identity comes from the JWT; the lifecycle engine
/// enforces the role check, the positive bid, and the one-per-project
/// upsert.
pub async fn submit_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitProposal>,
) -> impl Responder {
    let project_id = path.into_inner();

    match lifecycle::proposals::submit(db.get_ref(), project_id, user.0.id, body.into_inner())
        .await
    {
        Ok(proposal) => HttpResponse::Created().json(proposal),
        Err(e) => lifecycle_error_response(&e),
    }
}

/// GET /api/projects/{id}/proposals — all proposals on a project.
///
/// Only the project's client may see the full list.
pub async fn get_proposals_by_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let project_id = path.into_inner();

    match project_db::get_project_by_id(db.get_ref(), project_id).await {
        Ok(Some(project)) if project.client_id == user.0.id => {}
        Ok(Some(_)) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the project's client can view its proposals",
            }));
        }
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

    match proposal_db::get_proposals_by_project(db.get_ref(), project_id).await {
        Ok(proposals) => HttpResponse::Ok().json(proposals),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/proposals/mine — the authenticated freelancer's own proposals.
pub async fn get_my_proposals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match proposal_db::get_proposals_by_freelancer(db.get_ref(), user.0.id).await {
        Ok(proposals) => HttpResponse::Ok().json(proposals),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/proposals/{id}/accept — accept a proposal.
///
/// Returns the contract (created now, or pre-existing when the accept is
/// a retry of one that already won).
pub async fn accept_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let proposal_id = path.into_inner();

    match lifecycle::proposals::accept(db.get_ref(), proposal_id, user.0.id).await {
        Ok(contract) => HttpResponse::Ok().json(contract),
        Err(e) => lifecycle_error_response(&e),
    }
}

/// POST /api/proposals/{id}/reject — reject a proposal.
pub async fn reject_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let proposal_id = path.into_inner();

    match lifecycle::proposals::reject(db.get_ref(), proposal_id, user.0.id).await {
        Ok(proposal) => HttpResponse::Ok().json(proposal),
        Err(e) => lifecycle_error_response(&e),
    }
}
