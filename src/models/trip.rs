//! Business trip record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApprovalStatus;

/// A business trip eligible for the distance-tiered transport allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTrip {
    /// The date of the trip.
    pub date: NaiveDate,
    /// One-way distance in kilometres.
    pub distance_km: Decimal,
    /// Review status; only approved trips count.
    pub status: ApprovalStatus,
}

impl BusinessTrip {
    /// Whether this trip has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_trip() {
        let json = r#"{"date": "2026-03-12", "distance_km": "12.4", "status": "approved"}"#;
        let trip: BusinessTrip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.distance_km, Decimal::from_str("12.4").unwrap());
        assert!(trip.is_approved());
    }
}
