//! Non-chat screens: each action validates locally, calls the backend once
//! and reports the outcome as a [`Notice`](crate::notice::Notice).

mod shifts;
mod teams;
mod users;

pub use shifts::{ShiftDesk, ShiftOverview};
pub use teams::TeamDesk;
pub use users::UserForm;
