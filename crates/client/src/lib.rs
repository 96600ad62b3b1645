pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod messaging;
pub mod models;
pub mod notice;
pub mod realtime;
pub mod roster;

pub use api::ApiClient;
pub use config::{Config, SendMode, Session};
pub use error::ClientError;
pub use messaging::{ChatUpdate, Conversation, CurrentUser, Messenger};
pub use notice::Notice;
