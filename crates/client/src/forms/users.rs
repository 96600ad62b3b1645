use regex_lite::Regex;
use stadtwache_shared::validation::validate_registration;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{Registration, User};
use crate::notice::Notice;

const DEFAULT_ROLE: &str = "officer";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn looks_like_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

/// Registration of a new officer account by an administrator.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub department: String,
    pub team: String,
    pub badge_number: String,
    pub rank: String,
    pub phone: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl UserForm {
    pub fn validate(&self) -> Result<(), String> {
        validate_registration(
            &self.email,
            &self.username,
            &self.password,
            &self.confirm_password,
        )?;
        if !looks_like_email(self.email.trim()) {
            return Err("Bitte geben Sie eine gültige E-Mail-Adresse ein".into());
        }
        Ok(())
    }

    pub fn to_registration(&self) -> Registration {
        Registration {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            role: optional(&self.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            department: optional(&self.department),
            team: optional(&self.team),
            badge_number: optional(&self.badge_number),
            rank: optional(&self.rank),
            phone: optional(&self.phone),
        }
    }

    /// Validate and register. The created user comes back alongside the
    /// success notice.
    pub async fn submit(&self, api: &ApiClient) -> Result<(User, Notice), Notice> {
        self.validate().map_err(Notice::invalid)?;
        match api.register(&self.to_registration()).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.username);
                let notice = Notice::success(
                    "✅ Erfolg",
                    format!("Benutzer \"{}\" wurde erfolgreich erstellt!", user.username),
                );
                Ok((user, notice))
            }
            Err(e) => {
                tracing::error!("Registration failed: {}", e);
                Err(registration_error(&e))
            }
        }
    }
}

fn registration_error(err: &ClientError) -> Notice {
    let body = if err.is_network() {
        "Keine Verbindung zum Server. Bitte prüfen Sie Ihre Internetverbindung.".to_string()
    } else if let Some(detail) = err.detail() {
        let lowered = detail.to_lowercase();
        if lowered.contains("email") {
            "E-Mail-Adresse wird bereits verwendet".to_string()
        } else if lowered.contains("badge_number") || lowered.contains("badge number") {
            "Dienstnummer wird bereits verwendet".to_string()
        } else {
            detail.to_string()
        }
    } else {
        "Benutzer konnte nicht erstellt werden".to_string()
    };
    Notice::error("❌ Fehler", body)
}
