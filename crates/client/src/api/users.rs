use reqwest::Method;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{User, UsersByStatus};

impl ApiClient {
    /// GET /api/user/profile
    pub async fn profile(&self) -> Result<User, ClientError> {
        self.send(self.request(Method::GET, "/api/user/profile"))
            .await
    }

    /// GET /api/users/by-status
    pub async fn users_by_status(&self) -> Result<UsersByStatus, ClientError> {
        self.send(self.request(Method::GET, "/api/users/by-status"))
            .await
    }
}
