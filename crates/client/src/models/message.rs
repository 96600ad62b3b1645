use serde::{Deserialize, Deserializer, Serialize};
use stadtwache_shared::constants::{DEFAULT_CHANNEL, MESSAGE_TYPE_TEXT, UNKNOWN_SENDER_NAME};

/// A chat message as the backend transmits it, both over REST and in
/// `new_message` events.
///
/// A message is either a broadcast on `channel`, or a direct message when
/// `recipient_id` is set (the backend then tags it with the `private`
/// channel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    pub content: String,
    pub sender_id: String,
    #[serde(default = "unknown_sender", deserialize_with = "name_or_unknown")]
    pub sender_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default = "default_channel", deserialize_with = "channel_or_default")]
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default = "default_message_type")]
    pub message_type: String,
}

impl Message {
    /// When the message was sent. Older rows only carry `timestamp`.
    pub fn sent_at(&self) -> Option<&str> {
        self.created_at.as_deref().or(self.timestamp.as_deref())
    }

    pub fn is_direct(&self) -> bool {
        self.recipient_id.is_some()
    }

    /// Whether this message belongs to the pairwise conversation of `a` and `b`.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        match self.recipient_id.as_deref() {
            Some(recipient) => {
                (self.sender_id == a && recipient == b) || (self.sender_id == b && recipient == a)
            }
            None => false,
        }
    }
}

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    pub message_type: String,
}

fn unknown_sender() -> String {
    UNKNOWN_SENDER_NAME.to_string()
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

fn default_message_type() -> String {
    MESSAGE_TYPE_TEXT.to_string()
}

fn name_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(unknown_sender))
}

fn channel_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default_channel))
}
