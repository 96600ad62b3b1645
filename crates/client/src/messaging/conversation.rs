use std::fmt;

use stadtwache_shared::constants::{MESSAGE_TYPE_TEXT, PRIVATE_CHANNEL};
use stadtwache_shared::rooms::{channel_room, private_room};

use crate::models::{Message, NewMessage};

/// What a chat view is looking at: a broadcast channel or the pairwise
/// conversation with one other user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conversation {
    Channel(String),
    Direct { peer: String },
}

impl Conversation {
    pub fn channel(name: impl Into<String>) -> Self {
        Conversation::Channel(name.into())
    }

    pub fn direct(peer: impl Into<String>) -> Self {
        Conversation::Direct { peer: peer.into() }
    }

    /// The conversation `message` belongs to, seen from user `me`.
    pub fn of(message: &Message, me: &str) -> Self {
        match &message.recipient_id {
            Some(recipient) => {
                let peer = if message.sender_id == me {
                    recipient
                } else {
                    &message.sender_id
                };
                Conversation::direct(peer.clone())
            }
            None => Conversation::channel(message.channel.clone()),
        }
    }

    /// Realtime room key of this conversation for user `me`.
    pub fn room(&self, me: &str) -> String {
        match self {
            Conversation::Channel(name) => channel_room(name),
            Conversation::Direct { peer } => private_room(me, peer),
        }
    }

    /// REST body for posting `content` into this conversation.
    pub fn outgoing(&self, content: &str) -> NewMessage {
        match self {
            Conversation::Channel(name) => NewMessage {
                content: content.to_string(),
                channel: name.clone(),
                recipient_id: None,
                message_type: MESSAGE_TYPE_TEXT.into(),
            },
            Conversation::Direct { peer } => NewMessage {
                content: content.to_string(),
                channel: PRIVATE_CHANNEL.into(),
                recipient_id: Some(peer.clone()),
                message_type: MESSAGE_TYPE_TEXT.into(),
            },
        }
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversation::Channel(name) => write!(f, "#{}", name),
            Conversation::Direct { peer } => write!(f, "@{}", peer),
        }
    }
}
