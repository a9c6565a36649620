use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::jwt;
use crate::auth::middleware::JwtSecret;
use crate::chat::protocol::{ClientMessage, ServerMessage};
use crate::chat::server::ChatServer;
use crate::db::contracts as contract_db;
use crate::db::messages as message_db;
use crate::db::users as user_db;
use crate::lifecycle::notifications;
use crate::models::contracts::{self, Status};
use crate::models::messages::CreateMessage;

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/chat/ws/{contract_id}?token=<jwt>
///
/// Upgrades the HTTP connection to a WebSocket.
/// Authenticates via query param token (browsers can't send Authorization
/// headers during the WebSocket handshake).
/// Validates that:
/// 1. The JWT is valid.
/// 2. The contract exists and is Active — terminal contracts keep their
///    history readable over REST but take no new messages.
/// 3. The user is a party to the contract.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    query: web::Query<WsQuery>,
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    chat_server: web::Data<Arc<ChatServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    let contract_id = path.into_inner();

    // 1. Validate the JWT.
    let claims = jwt::validate_token(&query.token, &secret.0)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;

    let user = user_db::get_user_by_id(db.get_ref(), user_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown user"))?;

    // 2. Fetch the contract and verify it is Active.
    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?
        .ok_or_else(|| {
            actix_web::error::ErrorNotFound(format!("Contract {contract_id} not found"))
        })?;

    if contract.status != Status::Active {
        return Err(actix_web::error::ErrorForbidden(
            "Chat is only open while the contract is active",
        ));
    }

    // 3. Verify the user is a party to the contract.
    if !contract.is_party(user_id) {
        return Err(actix_web::error::ErrorForbidden(
            "You are not a party to this contract",
        ));
    }

    // 4. Upgrade to WebSocket.
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    // 5. Join the chat room and get a receiver for outgoing messages.
    let rx = chat_server.join(contract_id, user_id).await;

    // 6. Spawn the WebSocket session task.
    let db_clone = db.get_ref().clone();
    let chat_server_clone = chat_server.get_ref().clone();

    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        contract,
        user.username,
        user_id,
        db_clone,
        chat_server_clone,
    ));

    Ok(response)
}

/// Drives the WebSocket session: reads incoming messages from the client,
/// sends outgoing messages from the chat server, and cleans up on
/// disconnect.
#[allow(clippy::too_many_arguments)]
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    contract: contracts::Model,
    username: String,
    user_id: Uuid,
    db: DatabaseConnection,
    chat_server: Arc<ChatServer>,
) {
    let contract_id = contract.id;

    loop {
        tokio::select! {
            // Incoming message from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        handle_client_message(
                            &text,
                            &mut session,
                            &contract,
                            &username,
                            user_id,
                            &db,
                            &chat_server,
                        )
                        .await;
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Outgoing message from the chat server to this client.
            Some(server_msg) = rx.recv() => {
                let json = match serde_json::to_string(&server_msg) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    chat_server.leave(contract_id, user_id).await;
    let _ = session.close(None).await;
}

/// Parse and handle an incoming client message.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    contract: &contracts::Model,
    username: &str,
    user_id: Uuid,
    db: &DatabaseConnection,
    chat_server: &ChatServer,
) {
    let client_msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            send_error(session, format!("Invalid message format: {e}")).await;
            return;
        }
    };

    match client_msg {
        ClientMessage::SendMessage { content } => {
            if content.trim().is_empty() {
                send_error(session, "Message content cannot be empty".to_string()).await;
                return;
            }

            let input = CreateMessage {
                contract_id: contract.id,
                sender_id: user_id,
                content,
            };

            let saved = match message_db::insert_message(db, input).await {
                Ok(saved) => saved,
                Err(e) => {
                    send_error(session, format!("Failed to save message: {e}")).await;
                    return;
                }
            };

            let msg = ServerMessage::NewMessage {
                id: saved.id,
                sender_id: saved.sender_id,
                content: saved.content,
                created_at: saved.created_at.to_rfc3339(),
            };

            // Broadcast to all participants (including the sender, so they
            // get the server-assigned id and timestamp).
            chat_server.broadcast(contract.id, msg, None).await;

            // An offline recipient gets a notification row instead of a
            // live push.
            let other_party = contract.other_party(user_id);
            if !chat_server.is_user_online(contract.id, other_party).await {
                if let Err(e) =
                    notifications::notify(db, other_party, notifications::chat_message(username))
                        .await
                {
                    tracing::warn!("failed to notify offline chat recipient: {e}");
                }
            }
        }

        ClientMessage::Typing => {
            let msg = ServerMessage::UserTyping { user_id };
            // Only send to the other party — the sender knows they're typing.
            chat_server.broadcast(contract.id, msg, Some(user_id)).await;
        }

        ClientMessage::StopTyping => {
            let msg = ServerMessage::UserStopTyping { user_id };
            chat_server.broadcast(contract.id, msg, Some(user_id)).await;
        }
    }
}

async fn send_error(session: &mut actix_ws::Session, message: String) {
    let err = ServerMessage::Error { message };
    let _ = session
        .text(serde_json::to_string(&err).unwrap_or_default())
        .await;
}
