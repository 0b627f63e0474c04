//! Push notification delivery.
//!
//! The dispatcher resolves guardians through the link registry (done by the
//! caller) and performs the HTTP fan-out here: one POST per device token,
//! sent concurrently, with per-token outcomes folded into success/failure
//! counts. There is no retry and no delivery persistence; a failed send is
//! counted and reported in the same request.

mod service;

pub use service::{DeliveryCounts, PushMessage, PushService};
