//! API request/response models for location events.

use crate::db::models::events::LocationEvent;
use crate::types::{EventId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A coordinate as reported by devices: either a JSON number or a numeric
/// string (older firmware sends strings).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Parse to a finite f64, rejecting NaN/infinity and non-numeric text.
    pub fn as_finite_f64(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(n) => *n,
            Coordinate::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PositionRecordRequest {
    #[schema(value_type = Option<String>, format = "uuid")]
    pub user_id: Option<UserId>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<LocationEvent> for PositionResponse {
    fn from(event: LocationEvent) -> Self {
        Self {
            latitude: event.latitude,
            longitude: event.longitude,
            timestamp: event.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub count: usize,
    pub locations: Vec<PositionResponse>,
}

/// Query parameters for the guardian dashboard listing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UsersLocationQuery {
    /// Bound on the combined result set, clamped to [1, 200]. Defaults to 5.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersLocationPoint {
    pub id: EventId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<LocationEvent> for UsersLocationPoint {
    fn from(event: LocationEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            latitude: event.latitude,
            longitude: event.longitude,
            timestamp: event.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersLocationResponse {
    pub count: usize,
    pub data: Vec<UsersLocationPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_numbers_and_strings() {
        assert_eq!(Coordinate::Number(37.5).as_finite_f64(), Some(37.5));
        assert_eq!(Coordinate::Text("127.001".to_string()).as_finite_f64(), Some(127.001));
        assert_eq!(Coordinate::Text(" -12.5 ".to_string()).as_finite_f64(), Some(-12.5));
    }

    #[test]
    fn test_coordinate_rejects_non_finite_and_garbage() {
        assert_eq!(Coordinate::Number(f64::NAN).as_finite_f64(), None);
        assert_eq!(Coordinate::Number(f64::INFINITY).as_finite_f64(), None);
        assert_eq!(Coordinate::Text("NaN".to_string()).as_finite_f64(), None);
        assert_eq!(Coordinate::Text("inf".to_string()).as_finite_f64(), None);
        assert_eq!(Coordinate::Text("not-a-number".to_string()).as_finite_f64(), None);
        assert_eq!(Coordinate::Text(String::new()).as_finite_f64(), None);
    }
}
