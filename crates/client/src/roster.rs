use std::collections::BTreeMap;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{StatusUser, UsersByStatus};

const DEFAULT_ROLE: &str = "Beamter";

/// One colleague in the direct-message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: String,
    pub username: String,
    pub role: String,
    pub duty_status: String,
    pub department: Option<String>,
    pub service_number: Option<String>,
    pub initials: String,
    pub online: bool,
}

impl RosterEntry {
    fn from_status_user(user: &StatusUser, duty_status: &str) -> Self {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let role = present(&user.rank)
            .or_else(|| present(&user.role))
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role,
            duty_status: duty_status.to_string(),
            department: user.department.clone(),
            service_number: user.service_number.clone(),
            initials: initials(&user.username),
            online: user.is_online,
        }
    }
}

/// Avatar initials: first letter of the first and second word.
pub fn initials(username: &str) -> String {
    let mut words = username.split_whitespace();
    let first = words.next().and_then(|w| w.chars().next());
    let second = words.next().and_then(|w| w.chars().next());
    first
        .into_iter()
        .chain(second)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Everyone the current user can message, with live presence.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub async fn load(api: &ApiClient, me: &str) -> Result<Self, ClientError> {
        let groups = api.users_by_status().await?;
        Ok(Self::from_status_groups(&groups, me))
    }

    /// Flatten the status groups, leaving out `me`.
    pub fn from_status_groups(groups: &UsersByStatus, me: &str) -> Self {
        let entries = groups
            .iter()
            .flat_map(|(status, users)| {
                users
                    .iter()
                    .filter(move |u| u.id != me)
                    .map(move |u| RosterEntry::from_status_user(u, status))
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn get(&self, user_id: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id == user_id)
    }

    pub fn online_count(&self) -> usize {
        self.entries.iter().filter(|e| e.online).count()
    }

    pub fn by_status(&self) -> BTreeMap<&str, Vec<&RosterEntry>> {
        let mut groups: BTreeMap<&str, Vec<&RosterEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.duty_status.as_str()).or_default().push(entry);
        }
        groups
    }

    /// Returns whether anything changed.
    pub fn apply_presence(&mut self, user_id: &str, online: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == user_id) {
            Some(entry) if entry.online != online => {
                entry.online = online;
                true
            }
            _ => false,
        }
    }
}
