use chrono::Utc;
use stadtwache_shared::validation::validate_message_content;
use uuid::Uuid;

use crate::models::{Message, NewMessage};

use super::conversation::Conversation;
use super::list::{ChatMessage, Confirm, Insert, MessageList};
use super::unread::UnreadCounters;

/// Where an incoming message ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Routing {
    Appended(ChatMessage),
    /// Replaced the pending local echo `local_id`.
    Reconciled {
        local_id: String,
        message: ChatMessage,
    },
    Duplicate,
    Unread {
        conversation: Conversation,
        count: u32,
    },
    /// Own message for a conversation that is not open.
    Ignored,
}

/// A send in flight: the optimistic entry plus everything needed to settle
/// or roll it back.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub local_id: String,
    pub conversation: Conversation,
    pub request: NewMessage,
    /// The draft exactly as typed, restored when the send fails.
    pub draft: String,
    pub generation: u64,
    pub optimistic: ChatMessage,
}

/// Chat state of one session: the open view, its messages, the draft and
/// the unread counters of every other conversation.
///
/// Purely synchronous; [`Messenger`](super::Messenger) wraps it in a lock
/// and drives it from network results.
#[derive(Debug, Clone)]
pub struct ChatState {
    me: String,
    my_name: String,
    active: Option<Conversation>,
    generation: u64,
    messages: MessageList,
    unread: UnreadCounters,
    draft: String,
}

impl ChatState {
    pub fn new(me: impl Into<String>, my_name: impl Into<String>) -> Self {
        Self {
            me: me.into(),
            my_name: my_name.into(),
            active: None,
            generation: 0,
            messages: MessageList::default(),
            unread: UnreadCounters::default(),
            draft: String::new(),
        }
    }

    pub fn me(&self) -> &str {
        &self.me
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.active.as_ref()
    }

    /// Bumped on every view switch; responses tagged with an older value
    /// are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &MessageList {
        &self.messages
    }

    pub fn unread(&self) -> &UnreadCounters {
        &self.unread
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Switch the view to `conversation`: the list starts empty and the
    /// conversation's unread count is cleared.
    pub fn open(&mut self, conversation: Conversation) -> u64 {
        self.generation += 1;
        self.unread.clear(&conversation);
        self.messages.clear();
        self.active = Some(conversation);
        self.generation
    }

    pub fn receive(&mut self, message: Message) -> Routing {
        let conversation = Conversation::of(&message, &self.me);
        let is_own = message.sender_id == self.me;

        if self.active.as_ref() == Some(&conversation) {
            let local_id = self.pending_id_for(&message);
            let chat = ChatMessage::from_message(message, &self.me);
            return match self.messages.insert(chat.clone()) {
                Insert::Appended => Routing::Appended(chat),
                Insert::Reconciled(_) => Routing::Reconciled {
                    local_id: local_id.unwrap_or_default(),
                    message: chat,
                },
                Insert::Duplicate => Routing::Duplicate,
            };
        }

        if is_own {
            return Routing::Ignored;
        }
        let count = self.unread.increment(&conversation);
        Routing::Unread {
            conversation,
            count,
        }
    }

    fn pending_id_for(&self, message: &Message) -> Option<String> {
        if message.sender_id != self.me {
            return None;
        }
        self.messages
            .iter()
            .find(|m| m.pending && m.message.content == message.content)
            .map(|m| m.id().to_string())
    }

    /// Install history fetched under `generation`. Returns false, leaving
    /// the list alone, when the view has moved on since.
    pub fn apply_history(&mut self, generation: u64, messages: Vec<Message>) -> bool {
        if generation != self.generation {
            return false;
        }
        let history = super::history::annotate(messages, &self.me);
        self.messages.replace_with(history);
        true
    }

    /// Take the draft and append its optimistic echo.
    ///
    /// `Ok(None)` when there is nothing to send: no open view, or a draft
    /// that is empty after trimming. An over-long draft is rejected and
    /// left in place.
    pub fn begin_send(&mut self) -> Result<Option<PendingSend>, String> {
        let Some(conversation) = self.active.clone() else {
            return Ok(None);
        };
        if self.draft.trim().is_empty() {
            return Ok(None);
        }
        validate_message_content(&self.draft)?;

        let draft = std::mem::take(&mut self.draft);
        let content = draft.trim().to_string();
        let request = conversation.outgoing(&content);
        let local_id = format!("local-{}", Uuid::new_v4());

        let optimistic = ChatMessage {
            message: Message {
                id: local_id.clone(),
                content,
                sender_id: self.me.clone(),
                sender_name: self.my_name.clone(),
                recipient_id: request.recipient_id.clone(),
                channel: request.channel.clone(),
                created_at: Some(Utc::now().to_rfc3339()),
                timestamp: None,
                message_type: request.message_type.clone(),
            },
            is_own: true,
            pending: true,
        };
        self.messages.push_pending(optimistic.clone());

        Ok(Some(PendingSend {
            local_id,
            conversation,
            request,
            draft,
            generation: self.generation,
            optimistic,
        }))
    }

    /// Settle `pending` with the message the server stored.
    pub fn confirm_send(&mut self, pending: &PendingSend, mut stored: Message) -> Confirm {
        if stored.id.is_empty() {
            stored.id = Utc::now().timestamp_millis().to_string();
        }
        if pending.generation != self.generation {
            return Confirm::Missing;
        }
        let confirmed = ChatMessage::from_message(stored, &self.me);
        self.messages.confirm(&pending.local_id, confirmed)
    }

    /// Roll back a failed send: drop the echo and give the draft back,
    /// unless something new was typed meanwhile.
    pub fn fail_send(&mut self, pending: &PendingSend) -> bool {
        let removed = pending.generation == self.generation
            && self.messages.remove(&pending.local_id).is_some();
        if self.draft.is_empty() {
            self.draft = pending.draft.clone();
        }
        removed
    }

    pub fn remove(&mut self, message_id: &str) -> Option<ChatMessage> {
        self.messages.remove(message_id)
    }
}
