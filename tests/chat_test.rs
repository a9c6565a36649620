//! Tests for the in-memory chat room registry and the WebSocket protocol
//! shapes. No sockets are opened; the registry is driven directly.
//!
//! Run with: `cargo test --test chat_test`
use uuid::Uuid;

use talentlink_backend::chat::protocol::{ClientMessage, ServerMessage};
use talentlink_backend::chat::server::ChatServer;

#[tokio::test]
async fn test_join_announces_presence_to_the_other_party() {
    let server = ChatServer::new();
    let contract_id = Uuid::new_v4();
    let client = Uuid::new_v4();
    let freelancer = Uuid::new_v4();

    let mut client_rx = server.join(contract_id, client).await;
    let _freelancer_rx = server.join(contract_id, freelancer).await;

    match client_rx.recv().await {
        Some(ServerMessage::Presence { user_id, online }) => {
            assert_eq!(user_id, freelancer);
            assert!(online);
        }
        other => panic!("Expected a presence update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_broadcast_reaches_every_participant() {
    let server = ChatServer::new();
    let contract_id = Uuid::new_v4();
    let client = Uuid::new_v4();
    let freelancer = Uuid::new_v4();

    let mut client_rx = server.join(contract_id, client).await;
    let mut freelancer_rx = server.join(contract_id, freelancer).await;

    // Drain the presence update the freelancer's join sent to the client.
    let _ = client_rx.recv().await;

    let message = ServerMessage::NewMessage {
        id: Uuid::new_v4(),
        sender_id: client,
        content: "hello".to_string(),
        created_at: "2026-03-01T00:00:00Z".to_string(),
    };

    server.broadcast(contract_id, message, None).await;

    for rx in [&mut client_rx, &mut freelancer_rx] {
        match rx.recv().await {
            Some(ServerMessage::NewMessage { content, sender_id, .. }) => {
                assert_eq!(content, "hello");
                assert_eq!(sender_id, client);
            }
            other => panic!("Expected the chat message, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_broadcast_can_exclude_the_sender() {
    let server = ChatServer::new();
    let contract_id = Uuid::new_v4();
    let client = Uuid::new_v4();
    let freelancer = Uuid::new_v4();

    let mut client_rx = server.join(contract_id, client).await;
    let mut freelancer_rx = server.join(contract_id, freelancer).await;
    let _ = client_rx.recv().await; // presence

    server
        .broadcast(
            contract_id,
            ServerMessage::UserTyping { user_id: client },
            Some(client),
        )
        .await;

    match freelancer_rx.recv().await {
        Some(ServerMessage::UserTyping { user_id }) => assert_eq!(user_id, client),
        other => panic!("Expected a typing update, got {other:?}"),
    }

    // The sender's channel stays empty.
    assert!(client_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_online_tracking_follows_join_and_leave() {
    let server = ChatServer::new();
    let contract_id = Uuid::new_v4();
    let user = Uuid::new_v4();

    assert!(!server.is_user_online(contract_id, user).await);

    let _rx = server.join(contract_id, user).await;
    assert!(server.is_user_online(contract_id, user).await);

    server.leave(contract_id, user).await;
    assert!(!server.is_user_online(contract_id, user).await);
}

#[tokio::test]
async fn test_leave_keeps_other_device_connections() {
    let server = ChatServer::new();
    let contract_id = Uuid::new_v4();
    let user = Uuid::new_v4();

    // Same user connected twice (two devices).
    let _rx1 = server.join(contract_id, user).await;
    let _rx2 = server.join(contract_id, user).await;

    server.leave(contract_id, user).await;
    assert!(server.is_user_online(contract_id, user).await);

    server.leave(contract_id, user).await;
    assert!(!server.is_user_online(contract_id, user).await);
}

#[test]
fn test_client_messages_parse_from_tagged_json() {
    let parsed: ClientMessage =
        serde_json::from_str(r#"{"type":"send_message","content":"hi there"}"#).unwrap();
    match parsed {
        ClientMessage::SendMessage { content } => assert_eq!(content, "hi there"),
        other => panic!("Expected SendMessage, got {other:?}"),
    }

    let parsed: ClientMessage = serde_json::from_str(r#"{"type":"typing"}"#).unwrap();
    assert!(matches!(parsed, ClientMessage::Typing));

    assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"unknown"}"#).is_err());
}

#[test]
fn test_server_messages_serialize_with_snake_case_tags() {
    let value = serde_json::to_value(ServerMessage::Presence {
        user_id: Uuid::new_v4(),
        online: true,
    })
    .unwrap();

    assert_eq!(value["type"], "presence");
    assert_eq!(value["online"], true);
}
