//! Credential handling for the identity store.
//!
//! Only the hashing primitive lives here; session management is not part of
//! this service (clients keep the returned user ID and role).

pub mod password;
