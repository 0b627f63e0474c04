//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed operations for one table
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User accounts and latest device tokens
//! - [`GuardianLinks`]: Tracked-user/guardian relation (insert-only)
//! - [`DeviceTokens`]: Append-only device token registration history
//! - [`LocationEvents`]: Append-only location sample log
//!
//! # Common Pattern
//!
//! ```ignore
//! let mut conn = pool.acquire().await?;
//! let mut repo = LocationEvents::new(&mut conn);
//! let latest = repo.latest(user_id).await?;
//! ```

pub mod device_tokens;
pub mod guardian_links;
pub mod location_events;
pub mod users;

pub use device_tokens::DeviceTokens;
pub use guardian_links::GuardianLinks;
pub use location_events::LocationEvents;
pub use users::Users;
