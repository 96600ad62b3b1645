use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::Message;

use super::conversation::Conversation;
use super::list::ChatMessage;

/// Fetch the authoritative history of `conversation`, oldest first.
///
/// Channel history comes back in the server's order. Direct history is
/// narrowed to the pair and sorted by send time, since the private endpoint
/// answers newest first and may include other conversations.
pub async fn load(
    api: &ApiClient,
    me: &str,
    conversation: &Conversation,
) -> Result<Vec<Message>, ClientError> {
    match conversation {
        Conversation::Channel(name) => api.channel_messages(name).await,
        Conversation::Direct { peer } => {
            let messages = api.private_messages(peer).await?;
            Ok(narrow_to_pair(messages, me, peer))
        }
    }
}

pub fn narrow_to_pair(messages: Vec<Message>, me: &str, peer: &str) -> Vec<Message> {
    let mut pair: Vec<Message> = messages
        .into_iter()
        .filter(|m| m.is_between(me, peer))
        .collect();
    pair.sort_by(|a, b| a.sent_at().cmp(&b.sent_at()));
    pair
}

/// Mark each message as own or foreign for user `me`, keeping order.
pub fn annotate(messages: Vec<Message>, me: &str) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .map(|m| ChatMessage::from_message(m, me))
        .collect()
}
