use crate::constants::*;

pub fn validate_message_content(content: &str) -> Result<(), String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Nachricht darf nicht leer sein".into());
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(format!(
            "Nachricht darf höchstens {} Zeichen lang sein",
            MAX_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_channel_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Bitte geben Sie einen Kanalnamen ein".into());
    }
    if trimmed.chars().count() > MAX_CHANNEL_NAME_LENGTH {
        return Err(format!(
            "Kanalname darf höchstens {} Zeichen lang sein",
            MAX_CHANNEL_NAME_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_team_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Team-Name ist erforderlich".into());
    }
    if trimmed.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(format!(
            "Team-Name darf höchstens {} Zeichen lang sein",
            MAX_TEAM_NAME_LENGTH
        ));
    }
    Ok(())
}

pub fn validate_vacation(start_date: &str, end_date: &str, reason: &str) -> Result<(), String> {
    if start_date.trim().is_empty() || end_date.trim().is_empty() || reason.trim().is_empty() {
        return Err("Bitte alle Felder ausfüllen.".into());
    }
    Ok(())
}

pub fn validate_registration(
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), String> {
    if email.is_empty() || username.is_empty() || password.is_empty() {
        return Err("Bitte füllen Sie alle Pflichtfelder aus".into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Passwort muss mindestens {} Zeichen lang sein",
            MIN_PASSWORD_LENGTH
        ));
    }
    if password != confirm_password {
        return Err("Passwörter stimmen nicht überein".into());
    }
    Ok(())
}
