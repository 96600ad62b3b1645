use reqwest::Method;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{Registration, User};

impl ApiClient {
    /// POST /api/auth/register
    pub async fn register(&self, registration: &Registration) -> Result<User, ClientError> {
        self.send(
            self.request(Method::POST, "/api/auth/register")
                .json(registration),
        )
        .await
    }
}
