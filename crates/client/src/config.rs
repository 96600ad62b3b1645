use std::env;
use std::time::Duration;

use stadtwache_shared::constants::{
    CHAT_POLL_INTERVAL_SECS, DEFAULT_BACKEND_URL, DEFAULT_REALTIME_PATH, REQUEST_TIMEOUT_SECS,
};

/// How the composer delivers a new message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// POST to the REST API; the backend fans the message out to the rooms.
    #[default]
    Rest,
    /// Emit `send_message` over the realtime connection only.
    Realtime,
}

impl SendMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rest" => Some(SendMode::Rest),
            "realtime" | "socket" => Some(SendMode::Realtime),
            _ => None,
        }
    }
}

/// Session the terminal client runs as. Obtaining the token is outside this
/// crate; it is handed in from the environment.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub realtime_path: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub send_mode: SendMode,
    pub session: Option<Session>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            realtime_path: DEFAULT_REALTIME_PATH.into(),
            poll_interval: Duration::from_secs(CHAT_POLL_INTERVAL_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            send_mode: SendMode::Rest,
            session: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let backend_url = env::var("STADTWACHE_BACKEND_URL")
            .or_else(|_| env::var("EXPO_PUBLIC_BACKEND_URL"))
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.backend_url);

        let session = match (
            env::var("STADTWACHE_TOKEN"),
            env::var("STADTWACHE_USER_ID"),
        ) {
            (Ok(token), Ok(user_id)) => Some(Session {
                username: env::var("STADTWACHE_USERNAME").unwrap_or_else(|_| user_id.clone()),
                token,
                user_id,
            }),
            _ => None,
        };

        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            realtime_path: env::var("STADTWACHE_REALTIME_PATH")
                .unwrap_or(defaults.realtime_path),
            poll_interval: env::var("STADTWACHE_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            request_timeout: env::var("STADTWACHE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            send_mode: env::var("STADTWACHE_SEND_MODE")
                .ok()
                .and_then(|v| SendMode::parse(&v))
                .unwrap_or_default(),
            session,
        }
    }

    /// Config pointing at a specific backend, everything else default.
    pub fn for_backend(backend_url: impl Into<String>) -> Self {
        let url: String = backend_url.into();
        Self {
            backend_url: url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}
