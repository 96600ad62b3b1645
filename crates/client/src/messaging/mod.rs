mod channels;
mod conversation;
pub mod history;
mod list;
mod messenger;
mod state;
mod unread;

pub use channels::{slug, Channel, ChannelDirectory};
pub use conversation::Conversation;
pub use list::{ChatMessage, Confirm, Insert, MessageList};
pub use messenger::{ChatUpdate, CurrentUser, Loaded, Messenger, SendOutcome};
pub use state::{ChatState, PendingSend, Routing};
pub use unread::UnreadCounters;
