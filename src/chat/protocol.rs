use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Client -> Server messages ──

/// Messages the client sends to the server over WebSocket.
///
/// Read receipts and history clearing go through the REST endpoints; the
/// socket only carries the live conversation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Send a chat message to the other contract party.
    SendMessage { content: String },
    /// Notify the other party that the user is typing.
    Typing,
    /// Notify the other party that the user stopped typing.
    StopTyping,
}

// ── Server -> Client messages ──

/// Messages the server sends to the client over WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new message was received (or echo of the sender's own message,
    /// carrying the server-assigned id and timestamp).
    NewMessage {
        id: Uuid,
        sender_id: Uuid,
        content: String,
        created_at: String,
    },
    /// The other user is typing.
    UserTyping { user_id: Uuid },
    /// The other user stopped typing.
    UserStopTyping { user_id: Uuid },
    /// Presence update: a user came online or went offline in this chat.
    Presence { user_id: Uuid, online: bool },
    /// An error occurred.
    Error { message: String },
}
