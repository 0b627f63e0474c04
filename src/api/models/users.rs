//! Shared user types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which side of the guardian relation an account is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// A user whose device reports locations and whose events fan out to
    /// guardians.
    TrackedUser,
    /// A user who receives another user's locations and notifications.
    Guardian,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::TrackedUser).unwrap(), "\"tracked-user\"");
        assert_eq!(serde_json::to_string(&Role::Guardian).unwrap(), "\"guardian\"");
        assert_eq!(serde_json::from_str::<Role>("\"guardian\"").unwrap(), Role::Guardian);
    }
}
