//! Common type definitions shared across the crate.
//!
//! All user identifiers are UUIDs wrapped in a type alias for readability.
//! Location events use a 64-bit serial ID so that event ordering is
//! monotonic within the append-only log.

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type EventId = i64;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
