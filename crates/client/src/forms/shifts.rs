use stadtwache_shared::validation::validate_vacation;

use crate::api::ApiClient;
use crate::models::{CheckIn, CheckInRequest, CheckInStatus, User, Vacation, VacationRequest};
use crate::notice::Notice;

#[derive(Debug, Clone, Default)]
pub struct ShiftOverview {
    pub profile: Option<User>,
    pub checkins: Vec<CheckIn>,
    pub vacations: Vec<Vacation>,
}

/// Check-ins and vacation requests of the current user.
pub struct ShiftDesk {
    api: ApiClient,
    overview: ShiftOverview,
}

impl ShiftDesk {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            overview: ShiftOverview::default(),
        }
    }

    pub fn overview(&self) -> &ShiftOverview {
        &self.overview
    }

    /// Reload everything. Each part fails on its own: a failed profile
    /// keeps the last one, failed lists come back empty.
    pub async fn reload(&mut self) -> &ShiftOverview {
        match self.api.profile().await {
            Ok(profile) => self.overview.profile = Some(profile),
            Err(e) => tracing::warn!("Error loading profile: {}", e),
        }
        self.overview.checkins = self.api.checkins().await.unwrap_or_else(|e| {
            tracing::warn!("Error loading check-ins: {}", e);
            Vec::new()
        });
        self.overview.vacations = self.api.vacations().await.unwrap_or_else(|e| {
            tracing::warn!("Error loading vacation requests: {}", e);
            Vec::new()
        });
        &self.overview
    }

    pub async fn check_in(&mut self, status: CheckInStatus) -> Notice {
        match self.api.check_in(&CheckInRequest::now(status)).await {
            Ok(_) => {
                tracing::info!("Check-in sent: {:?}", status);
                self.reload().await;
                Notice::success(
                    "✅ Check-In erfolgreich!",
                    format!("Status: {}", status.label()),
                )
            }
            Err(e) => {
                tracing::error!("Check-in failed: {}", e);
                Notice::from_error(&e, "Check-In konnte nicht übertragen werden.")
            }
        }
    }

    pub async fn request_vacation(&mut self, form: &VacationRequest) -> Notice {
        if let Err(reason) = validate_vacation(&form.start_date, &form.end_date, &form.reason) {
            return Notice::invalid(reason);
        }
        match self.api.request_vacation(form).await {
            Ok(_) => {
                self.reload().await;
                Notice::success("✅ Erfolg", "Urlaubsantrag wurde eingereicht!")
            }
            Err(e) => {
                tracing::error!("Vacation request failed: {}", e);
                Notice::from_error(&e, "Urlaubsantrag konnte nicht eingereicht werden.")
            }
        }
    }

    pub async fn delete_vacation(&mut self, vacation_id: &str) -> Notice {
        match self.api.delete_vacation(vacation_id).await {
            Ok(()) => {
                self.reload().await;
                Notice::success("✅ Erfolg", "Urlaubsantrag wurde gelöscht")
            }
            Err(e) => {
                tracing::error!("Deleting vacation {} failed: {}", vacation_id, e);
                Notice::from_error(&e, "Urlaubsantrag konnte nicht gelöscht werden")
            }
        }
    }
}
