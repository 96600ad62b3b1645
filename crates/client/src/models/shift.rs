use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    Ok,
    HelpNeeded,
    Emergency,
    #[serde(other)]
    Unknown,
}

impl CheckInStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckInStatus::Ok => "Alles OK",
            CheckInStatus::HelpNeeded => "Hilfe benötigt",
            CheckInStatus::Emergency => "Notfall",
            CheckInStatus::Unknown => "Unbekannt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default = "default_check_in_status")]
    pub status: CheckInStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/checkin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInRequest {
    pub status: CheckInStatus,
    pub message: String,
    pub timestamp: String,
}

impl CheckInRequest {
    pub fn now(status: CheckInStatus) -> Self {
        Self {
            status,
            message: status.label().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl VacationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "Ausstehend",
            VacationStatus::Approved => "Genehmigt",
            VacationStatus::Rejected => "Abgelehnt",
            VacationStatus::Unknown => "Unbekannt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_vacation_status")]
    pub status: VacationStatus,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/vacations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VacationRequest {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

fn default_check_in_status() -> CheckInStatus {
    CheckInStatus::Ok
}

fn default_vacation_status() -> VacationStatus {
    VacationStatus::Pending
}
