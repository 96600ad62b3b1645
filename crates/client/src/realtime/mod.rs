mod connection;
pub mod events;

pub use connection::{connect, realtime_url, RealtimeHandle};
pub use events::{ClientEvent, OutgoingMessage, RealtimeEvent, ServerEvent};
