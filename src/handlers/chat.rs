use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::chat_clears as clear_db;
use crate::db::contracts as contract_db;
use crate::db::messages as message_db;
use crate::models::messages::{MessageListQuery, MessageResponse};

/// Helper: verify the authenticated user is a party to the given contract.
/// History stays readable on terminal contracts, so status is not checked
/// here — only on the send path.
async fn authorize_contract_party(
    db: &DatabaseConnection,
    contract_id: Uuid,
    user_id: Uuid,
) -> Result<crate::models::contracts::Model, HttpResponse> {
    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {contract_id} not found"),
            }))
        })?;

    if !contract.is_party(user_id) {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a party to this contract",
        })));
    }

    Ok(contract)
}

/// GET /api/chat/{contract_id}/messages?limit=&cursor_created_at=&cursor_id=
///
/// Cursor-paginated message history for a contract, hiding anything at or
/// before the caller's clear marker. Only the two parties can access this.
pub async fn get_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<MessageListQuery>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let user_id = user.0.id;

    if let Err(resp) = authorize_contract_party(db.get_ref(), contract_id, user_id).await {
        return resp;
    }

    let cleared_after = match clear_db::get_cleared_at(db.get_ref(), user_id, contract_id).await {
        Ok(cleared) => cleared,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match message_db::get_messages_by_contract(
        db.get_ref(),
        contract_id,
        query.limit(),
        query.cursor_created_at,
        query.cursor_id,
        cleared_after,
    )
    .await
    {
        Ok(messages) => {
            let response: Vec<MessageResponse> = messages.into_iter().map(|m| m.into()).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/chat/{contract_id}/read — mark the other party's messages read.
pub async fn mark_all_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let user_id = user.0.id;

    if let Err(resp) = authorize_contract_party(db.get_ref(), contract_id, user_id).await {
        return resp;
    }

    match message_db::mark_all_read_for_contract(db.get_ref(), contract_id, user_id).await {
        Ok(marked) => HttpResponse::Ok().json(serde_json::json!({
            "marked_read": marked,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mark messages as read: {e}"),
        })),
    }
}

/// POST /api/chat/{contract_id}/clear — hide the conversation's history
/// for the caller only (the other party keeps theirs).
pub async fn clear_chat(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let user_id = user.0.id;

    if let Err(resp) = authorize_contract_party(db.get_ref(), contract_id, user_id).await {
        return resp;
    }

    match clear_db::set_cleared(db.get_ref(), user_id, contract_id).await {
        Ok(cleared_at) => HttpResponse::Ok().json(serde_json::json!({
            "cleared_at": cleared_at,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to clear chat: {e}"),
        })),
    }
}
