use reqwest::Method;

use super::ApiClient;
use crate::error::ClientError;
use crate::models::{CheckIn, CheckInRequest, Vacation, VacationRequest};

impl ApiClient {
    /// POST /api/checkin
    pub async fn check_in(&self, request: &CheckInRequest) -> Result<CheckIn, ClientError> {
        self.send(self.request(Method::POST, "/api/checkin").json(request))
            .await
    }

    /// GET /api/checkins
    pub async fn checkins(&self) -> Result<Vec<CheckIn>, ClientError> {
        self.send(self.request(Method::GET, "/api/checkins")).await
    }

    /// POST /api/vacations
    pub async fn request_vacation(
        &self,
        request: &VacationRequest,
    ) -> Result<Vacation, ClientError> {
        self.send(self.request(Method::POST, "/api/vacations").json(request))
            .await
    }

    /// GET /api/vacations
    pub async fn vacations(&self) -> Result<Vec<Vacation>, ClientError> {
        self.send(self.request(Method::GET, "/api/vacations")).await
    }

    /// DELETE /api/vacations/:id
    pub async fn delete_vacation(&self, vacation_id: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(Method::DELETE, &format!("/api/vacations/{}", vacation_id)))
            .await?;
        Ok(())
    }
}
