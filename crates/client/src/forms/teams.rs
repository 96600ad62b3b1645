use stadtwache_shared::validation::validate_team_name;

use crate::api::ApiClient;
use crate::models::{Team, TeamDraft};
use crate::notice::Notice;

pub struct TeamDesk {
    api: ApiClient,
    teams: Vec<Team>,
}

impl TeamDesk {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            teams: Vec::new(),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub async fn reload(&mut self) -> &[Team] {
        self.teams = self.api.teams().await.unwrap_or_else(|e| {
            tracing::error!("Error loading teams: {}", e);
            Vec::new()
        });
        &self.teams
    }

    pub async fn create_team(&mut self, draft: &TeamDraft) -> Notice {
        if let Err(reason) = validate_team_name(&draft.name) {
            return Notice::invalid(reason);
        }
        let draft = draft.normalized();
        match self.api.create_team(&draft).await {
            Ok(team) => {
                tracing::info!("Team created: {}", team.name);
                self.reload().await;
                Notice::success("✅ Erfolg", format!("Team \"{}\" wurde erstellt!", draft.name))
            }
            Err(e) => {
                tracing::error!("Creating team failed: {}", e);
                Notice::from_error(&e, "Team konnte nicht erstellt werden")
            }
        }
    }
}
