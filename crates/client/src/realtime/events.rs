use serde::{Deserialize, Serialize};

use crate::models::Message;

// Every frame is a JSON object `{"event": <name>, "data": <payload>}`, the
// socket event names the backend already speaks.

// ── Client → Server Events ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinUserRoom(String),
    JoinChannel(String),
    JoinPrivateRoom { user1: String, user2: String },
    SendMessage(OutgoingMessage),
}

/// Payload of `send_message`. The backend stores and fans it out itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub content: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    pub sender_id: String,
    pub sender_name: String,
    pub message_type: String,
    pub created_at: String,
}

// ── Server → Client Events ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    NewMessage(Message),
    MessageDeleted {
        message_id: String,
        #[serde(default)]
        channel: Option<String>,
    },
    UserStatusUpdate(serde_json::Value),
    UserOnline {
        user_id: String,
    },
    UserOffline {
        user_id: String,
    },
    JoinedRoom {
        room: String,
    },
}

/// What the connection task hands to its consumer.
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    Connected,
    Server(ServerEvent),
    Disconnected,
}
