use std::collections::HashSet;

use serde::Serialize;

use crate::models::Message;

/// A message as a chat view renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    #[serde(flatten)]
    pub message: Message,
    #[serde(rename = "isOwn")]
    pub is_own: bool,
    /// Optimistic local echo whose delivery is not confirmed yet.
    #[serde(skip)]
    pub pending: bool,
}

impl ChatMessage {
    pub fn from_message(message: Message, me: &str) -> Self {
        let is_own = message.sender_id == me;
        Self {
            message,
            is_own,
            pending: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.message.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insert {
    Appended,
    /// Took the place of a pending local echo; carries its position.
    Reconciled(usize),
    Duplicate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Confirm {
    /// The pending entry now carries the server's copy.
    Replaced(ChatMessage),
    /// The server's copy was already in the list (delivered by realtime
    /// first); the pending entry was dropped.
    AlreadyPresent(ChatMessage),
    /// The pending entry is gone, e.g. the view was switched.
    Missing,
}

/// Messages of the active view, oldest first, unique by id.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    items: Vec<ChatMessage>,
}

impl MessageList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ChatMessage> {
        self.items.iter().find(|m| m.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|m| m.pending).count()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push_pending(&mut self, mut message: ChatMessage) {
        message.pending = true;
        self.items.push(message);
    }

    /// Insert a message delivered by the server.
    ///
    /// Own messages without a known id take over the oldest pending echo
    /// with the same content, which is how realtime-only sends are confirmed.
    pub fn insert(&mut self, message: ChatMessage) -> Insert {
        if self.contains(message.id()) {
            return Insert::Duplicate;
        }
        if message.is_own {
            if let Some(pos) = self
                .items
                .iter()
                .position(|m| m.pending && m.message.content == message.message.content)
            {
                self.items[pos] = ChatMessage {
                    pending: false,
                    ..message
                };
                return Insert::Reconciled(pos);
            }
        }
        self.items.push(message);
        Insert::Appended
    }

    /// Settle the pending entry `local_id` with the server's copy.
    pub fn confirm(&mut self, local_id: &str, confirmed: ChatMessage) -> Confirm {
        let Some(pos) = self.items.iter().position(|m| m.id() == local_id) else {
            return Confirm::Missing;
        };
        if let Some(existing) = self.get(confirmed.id()).cloned() {
            self.items.remove(pos);
            return Confirm::AlreadyPresent(existing);
        }
        self.items[pos] = ChatMessage {
            pending: false,
            ..confirmed
        };
        Confirm::Replaced(self.items[pos].clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<ChatMessage> {
        let pos = self.items.iter().position(|m| m.id() == id)?;
        Some(self.items.remove(pos))
    }

    /// Replace the list with authoritative history, keeping the server's
    /// order and any local echoes still waiting for confirmation.
    ///
    /// A pending echo whose stored copy is already part of the history is
    /// dropped: the newest own message with the same content that was not
    /// shown before takes its place.
    pub fn replace_with(&mut self, history: Vec<ChatMessage>) {
        let known: HashSet<String> = self
            .items
            .iter()
            .filter(|m| !m.pending)
            .map(|m| m.message.id.clone())
            .collect();
        let pending: Vec<ChatMessage> = self.items.drain(..).filter(|m| m.pending).collect();

        let mut seen = HashSet::new();
        self.items = history
            .into_iter()
            .filter(|m| seen.insert(m.message.id.clone()))
            .collect();

        let mut claimed: HashSet<String> = HashSet::new();
        for echo in pending {
            let stored = self
                .items
                .iter()
                .rev()
                .find(|m| {
                    m.is_own
                        && m.message.content == echo.message.content
                        && !known.contains(m.id())
                        && !claimed.contains(m.id())
                })
                .map(|m| m.id().to_string());
            match stored {
                Some(id) => {
                    claimed.insert(id);
                }
                None => self.items.push(echo),
            }
        }
    }
}
