pub const APP_NAME: &str = "Stadtwache";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_REALTIME_PATH: &str = "/ws";

// Channels
pub const DEFAULT_CHANNEL: &str = "general";
pub const PRIVATE_CHANNEL: &str = "private";

/// Broadcast channels every client starts with, as (id, label).
pub const DEFAULT_CHANNELS: [(&str, &str); 4] = [
    ("general", "Allgemein"),
    ("emergency", "Notfall"),
    ("patrol", "Streife"),
    ("admin", "Admin"),
];

/// Channels that can never be removed from a client's channel list.
pub const PROTECTED_CHANNELS: [&str; 3] = ["general", "emergency", "patrol"];

// Messages
pub const UNKNOWN_SENDER_NAME: &str = "Unbekannt";
pub const MESSAGE_TYPE_TEXT: &str = "text";

// Limits
pub const MAX_MESSAGE_LENGTH: usize = 4000;
pub const MAX_CHANNEL_NAME_LENGTH: usize = 50;
pub const MAX_TEAM_NAME_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_TEAM_SIZE: u32 = 6;

// Polling
pub const CHAT_POLL_INTERVAL_SECS: u64 = 5;

// HTTP
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
