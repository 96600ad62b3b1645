pub mod message;
pub mod shift;
pub mod team;
pub mod user;

pub use message::*;
pub use shift::*;
pub use team::*;
pub use user::*;
