pub mod geometry;
pub mod layout;
pub mod session;
pub mod time;
