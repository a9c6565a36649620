use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::handlers::lifecycle_error_response;
use crate::lifecycle;

/// GET /api/contracts — list contracts where the user is a party
/// (either the client or the freelancer).
pub async fn get_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match contract_db::get_contracts_for_user(db.get_ref(), user.0.id).await {
        Ok(contracts) => HttpResponse::Ok().json(contracts),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/contracts/{id} — get a single contract (parties only).
pub async fn get_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let contract = match contract_db::get_contract_by_id(db.get_ref(), contract_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {contract_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if !contract.is_party(user.0.id) {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only view contracts you are a party to",
        }));
    }

    HttpResponse::Ok().json(contract)
}

/// POST /api/contracts/{id}/complete — mark an active contract completed.
pub async fn complete_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    match lifecycle::contracts::complete(db.get_ref(), contract_id, user.0.id).await {
        Ok(contract) => HttpResponse::Ok().json(contract),
        Err(e) => lifecycle_error_response(&e),
    }
}

/// POST /api/contracts/{id}/cancel — cancel an active contract.
pub async fn cancel_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    match lifecycle::contracts::cancel(db.get_ref(), contract_id, user.0.id).await {
        Ok(contract) => HttpResponse::Ok().json(contract),
        Err(e) => lifecycle_error_response(&e),
    }
}
