use std::collections::HashMap;

use super::conversation::Conversation;

/// Unread message counts per conversation. Lives only as long as the
/// session; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct UnreadCounters {
    counts: HashMap<Conversation, u32>,
}

impl UnreadCounters {
    pub fn get(&self, conversation: &Conversation) -> u32 {
        self.counts.get(conversation).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, conversation: &Conversation) -> u32 {
        let count = self.counts.entry(conversation.clone()).or_insert(0);
        *count += 1;
        *count
    }

    /// Reset a conversation to zero, returning the previous count.
    pub fn clear(&mut self, conversation: &Conversation) -> u32 {
        self.counts.remove(conversation).unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Conversation, u32)> {
        self.counts.iter().map(|(c, n)| (c, *n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
