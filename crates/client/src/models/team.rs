use serde::{Deserialize, Serialize};
use stadtwache_shared::constants::DEFAULT_TEAM_SIZE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub leader_id: Option<String>,
    #[serde(default)]
    pub max_members: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /api/admin/teams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub district: String,
    pub max_members: u32,
    pub status: String,
    pub members: Vec<String>,
}

impl TeamDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Copy with surrounding whitespace removed and a zero size replaced by
    /// the default.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            district: self.district.trim().to_string(),
            max_members: if self.max_members == 0 {
                DEFAULT_TEAM_SIZE
            } else {
                self.max_members
            },
            status: self.status.clone(),
            members: self.members.clone(),
        }
    }
}

impl Default for TeamDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            district: String::new(),
            max_members: DEFAULT_TEAM_SIZE,
            status: "Einsatzbereit".into(),
            members: Vec::new(),
        }
    }
}
