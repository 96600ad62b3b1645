use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub badge_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service_number: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default = "default_duty_status")]
    pub status: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub assigned_district: Option<String>,
    #[serde(default)]
    pub patrol_team: Option<String>,
}

/// Body of `POST /api/auth/register`. Optional fields go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: String,
    pub department: Option<String>,
    pub team: Option<String>,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub phone: Option<String>,
}

/// A user row of `GET /api/users/by-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub service_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_duty_status")]
    pub status: String,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub patrol_team: Option<String>,
    #[serde(default)]
    pub assigned_district: Option<String>,
}

/// Users grouped by duty status ("Im Dienst", "Pause", ...).
pub type UsersByStatus = BTreeMap<String, Vec<StatusUser>>;

fn default_duty_status() -> String {
    "Im Dienst".to_string()
}

fn default_true() -> bool {
    true
}
