use reqwest::Method;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{Message, NewMessage};

impl ApiClient {
    /// GET /api/messages?channel=
    pub async fn channel_messages(&self, channel: &str) -> Result<Vec<Message>, ClientError> {
        self.send(
            self.request(Method::GET, "/api/messages")
                .query(&[("channel", channel)]),
        )
        .await
    }

    /// GET /api/messages/private
    ///
    /// Asks for the conversation with `peer` only. Backends that ignore the
    /// filter return every private message of the caller, so callers still
    /// narrow the result down to the pair.
    pub async fn private_messages(&self, peer: &str) -> Result<Vec<Message>, ClientError> {
        self.send(
            self.request(Method::GET, "/api/messages/private")
                .query(&[("with", peer)]),
        )
        .await
    }

    /// POST /api/messages
    pub async fn post_message(&self, message: &NewMessage) -> Result<Message, ClientError> {
        self.send(self.request(Method::POST, "/api/messages").json(message))
            .await
    }

    /// DELETE /api/messages/:id
    pub async fn delete_message(&self, message_id: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(Method::DELETE, &format!("/api/messages/{}", message_id)))
            .await?;
        Ok(())
    }
}
