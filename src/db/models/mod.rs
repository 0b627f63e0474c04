//! Database record structures matching table schemas.

pub mod events;
pub mod links;
pub mod tokens;
pub mod users;
