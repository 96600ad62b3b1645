use stadtwache_shared::constants::{
    DEFAULT_CHANNEL, DEFAULT_CHANNELS, PRIVATE_CHANNEL, PROTECTED_CHANNELS,
};
use stadtwache_shared::validation::validate_channel_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub label: String,
    /// Created in this session; only this client knows about it.
    pub local: bool,
}

/// Broadcast channels offered to the user.
///
/// Created channels live in this process only. There is no backend
/// endpoint for them, so other clients never see them.
#[derive(Debug, Clone)]
pub struct ChannelDirectory {
    channels: Vec<Channel>,
}

impl Default for ChannelDirectory {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNELS
                .iter()
                .map(|(id, label)| Channel {
                    id: id.to_string(),
                    label: label.to_string(),
                    local: false,
                })
                .collect(),
        }
    }
}

/// Channel id for a display name: lowercase, whitespace runs become `_`.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

impl ChannelDirectory {
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn create(&mut self, name: &str) -> Result<&Channel, String> {
        validate_channel_name(name)?;
        let id = slug(name);
        // Reserved for direct messages on the backend.
        if id == PRIVATE_CHANNEL {
            return Err("Dieser Kanalname ist reserviert".into());
        }
        if self.contains(&id) {
            return Err("Ein Kanal mit diesem Namen existiert bereits".into());
        }
        self.channels.push(Channel {
            id,
            label: name.trim().to_string(),
            local: true,
        });
        let index = self.channels.len() - 1;
        Ok(&self.channels[index])
    }

    /// Remove channel `id` while `active` is shown. Returns the channel that
    /// should be active afterwards.
    pub fn remove(&mut self, id: &str, active: &str) -> Result<String, String> {
        if PROTECTED_CHANNELS.contains(&id) {
            return Err("Standard-Kanäle können nicht gelöscht werden".into());
        }
        let Some(pos) = self.channels.iter().position(|c| c.id == id) else {
            return Err("Kanal nicht gefunden".into());
        };
        self.channels.remove(pos);
        if active == id {
            Ok(DEFAULT_CHANNEL.to_string())
        } else {
            Ok(active.to_string())
        }
    }
}
