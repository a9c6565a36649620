use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::chat::protocol::ServerMessage;

/// A handle to send messages to a connected WebSocket client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub user_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Manages all active WebSocket connections, one room per contract.
///
/// A room holds the handles of every open connection for that contract's
/// two parties (a party can be connected from several devices at once).
/// The lifecycle/chat handlers use `is_user_online` to decide whether a
/// recipient needs a notification row instead of a live push.
pub struct ChatServer {
    /// contract_id -> list of connected client handles
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new WebSocket connection for a contract.
    /// Returns a receiver that the WebSocket session should listen on.
    pub async fn join(
        &self,
        contract_id: Uuid,
        user_id: Uuid,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = ClientHandle {
            user_id,
            sender: tx,
        };

        let presence_msg = ServerMessage::Presence {
            user_id,
            online: true,
        };

        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(contract_id).or_insert_with(Vec::new);

        // Tell the party already in the room before adding the newcomer.
        for client in room.iter() {
            if client.user_id != user_id {
                let _ = client.sender.send(presence_msg.clone());
            }
        }

        room.push(handle);

        rx
    }

    /// Remove one WebSocket connection for a contract.
    pub async fn leave(&self, contract_id: Uuid, user_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(&contract_id) {
            // Remove a single handle: the user may still be connected
            // from another device.
            if let Some(pos) = room.iter().position(|c| c.user_id == user_id) {
                room.remove(pos);
            }

            let still_connected = room.iter().any(|c| c.user_id == user_id);

            if !still_connected {
                let presence_msg = ServerMessage::Presence {
                    user_id,
                    online: false,
                };
                for client in room.iter() {
                    let _ = client.sender.send(presence_msg.clone());
                }
            }

            if room.is_empty() {
                rooms.remove(&contract_id);
            }
        }
    }

    /// Broadcast a message to all participants in a contract chat,
    /// optionally excluding the sender.
    pub async fn broadcast(
        &self,
        contract_id: Uuid,
        message: ServerMessage,
        exclude_user: Option<Uuid>,
    ) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&contract_id) {
            for client in room {
                if Some(client.user_id) == exclude_user {
                    continue;
                }
                // A failed send means the receiver disconnected; leave()
                // cleans the handle up.
                let _ = client.sender.send(message.clone());
            }
        }
    }

    /// Check if a specific user currently has a connection in a contract chat.
    pub async fn is_user_online(&self, contract_id: Uuid, user_id: Uuid) -> bool {
        let rooms = self.rooms.read().await;
        rooms
            .get(&contract_id)
            .map(|room| room.iter().any(|c| c.user_id == user_id))
            .unwrap_or(false)
    }
}

impl Default for ChatServer {
    fn default() -> Self {
        Self::new()
    }
}
