pub mod constants;
pub mod rooms;
pub mod validation;
