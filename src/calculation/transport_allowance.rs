//! Transport allowance calculation.
//!
//! A distance-tiered per-trip bonus for approved business trips. Each
//! trip is priced independently; there is no cross-trip batching.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{AuditStep, BusinessTrip, TransportAllowance, TripAllowance};
use crate::settings::Settings;

/// The result of calculating the transport allowance, including the audit step.
#[derive(Debug, Clone)]
pub struct TransportAllowanceResult {
    /// The computed allowance with per-trip rows.
    pub allowance: TransportAllowance,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the transport allowance over a month of business trips.
///
/// For each approved trip, `intervals = ceil(distance / km_per_interval)`
/// (zero for a zero-distance trip) and the trip pays
/// `intervals × amount_per_interval`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_transport_allowance;
/// use payroll_engine::models::{ApprovalStatus, BusinessTrip};
/// use payroll_engine::settings::Settings;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let trips = vec![BusinessTrip {
///     date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
///     distance_km: Decimal::from_str("12").unwrap(),
///     status: ApprovalStatus::Approved,
/// }];
/// let result = calculate_transport_allowance(&trips, &Settings::default(), 1);
/// // ceil(12 / 5) = 3 intervals x 60.00
/// assert_eq!(result.allowance.amount_cents, 18_000);
/// ```
pub fn calculate_transport_allowance(
    trips: &[BusinessTrip],
    settings: &Settings,
    step_number: u32,
) -> TransportAllowanceResult {
    let per_interval_cents = settings.transport_amount_per_interval * 100;
    let km_per_interval = settings.transport_km_per_interval;

    let mut rows = Vec::new();
    let mut amount_cents = 0i64;
    for trip in trips {
        if !trip.is_approved() {
            continue;
        }

        let intervals = if trip.distance_km.is_zero() || km_per_interval.is_zero() {
            0u32
        } else {
            (trip.distance_km / km_per_interval)
                .ceil()
                .to_u32()
                .unwrap_or(0)
        };
        let trip_amount_cents = i64::from(intervals) * per_interval_cents;
        amount_cents += trip_amount_cents;

        rows.push(TripAllowance {
            date: trip.date,
            distance_km: trip.distance_km,
            intervals,
            amount_cents: trip_amount_cents,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "transport_allowance".to_string(),
        rule_name: "Transport Allowance".to_string(),
        input: serde_json::json!({
            "approved_trips": rows.len(),
            "km_per_interval": km_per_interval.normalize().to_string(),
            "per_interval_cents": per_interval_cents,
        }),
        output: serde_json::json!({
            "amount_cents": amount_cents,
        }),
        reasoning: format!("{} approved trips priced independently", rows.len()),
    };

    TransportAllowanceResult {
        allowance: TransportAllowance {
            trips: rows,
            amount_cents,
        },
        audit_step,
    }
}
