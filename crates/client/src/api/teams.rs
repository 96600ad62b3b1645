use reqwest::Method;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{Team, TeamDraft};

impl ApiClient {
    /// GET /api/admin/teams
    pub async fn teams(&self) -> Result<Vec<Team>, ClientError> {
        self.send(self.request(Method::GET, "/api/admin/teams"))
            .await
    }

    /// POST /api/admin/teams
    pub async fn create_team(&self, draft: &TeamDraft) -> Result<Team, ClientError> {
        self.send(self.request(Method::POST, "/api/admin/teams").json(draft))
            .await
    }
}
