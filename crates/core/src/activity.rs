//! Weekday activity buckets for the dashboard aggregate.
//!
//! The dashboard stores one bucket per weekday, Monday first, each holding
//! accumulated playback hours. The total active time is tracked separately
//! in whole seconds; conversion to hours happens only at this boundary.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Weekday labels in bucket order (Monday first), as persisted in the
/// dashboard `activity` array.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Decimal places kept when accumulating hours into a bucket.
///
/// Four places (0.36-second granularity) keep typical 5-second samples
/// visible while bounding floating drift across accumulations.
pub const HOURS_PRECISION: i32 = 4;

/// One weekday bucket of accumulated playback hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: String,
    pub hours: f64,
}

/// A fresh all-zero week, Monday first.
pub fn empty_week() -> Vec<DayActivity> {
    WEEKDAY_LABELS
        .iter()
        .map(|day| DayActivity {
            day: (*day).to_string(),
            hours: 0.0,
        })
        .collect()
}

/// Bucket index for a date: Monday -> 0 .. Sunday -> 6.
pub fn day_index(date: chrono::NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Round hours to the configured bucket precision.
pub fn round_hours(hours: f64) -> f64 {
    let scale = 10f64.powi(HOURS_PRECISION);
    (hours * scale).round() / scale
}

/// Convert watched seconds to rounded hours.
pub fn seconds_to_hours(seconds: i64) -> f64 {
    round_hours(seconds as f64 / 3600.0)
}

/// Fold watched seconds into the bucket at `index`.
///
/// Accumulates, then re-rounds, so repeated small samples add up instead of
/// vanishing or drifting. Out-of-range indices are ignored.
pub fn add_seconds(week: &mut [DayActivity], index: usize, seconds: i64) {
    if let Some(bucket) = week.get_mut(index) {
        bucket.hours = round_hours(bucket.hours + seconds as f64 / 3600.0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_week_is_monday_first_all_zero() {
        let week = empty_week();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, "Mon");
        assert_eq!(week[6].day, "Sun");
        assert!(week.iter().all(|b| b.hours == 0.0));
    }

    #[test]
    fn day_index_maps_monday_to_zero_sunday_to_six() {
        // 2024-01-01 was a Monday.
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).expect("valid date");

        assert_eq!(day_index(monday), 0);
        assert_eq!(day_index(sunday), 6);
    }

    #[test]
    fn repeated_samples_accumulate_instead_of_overwriting() {
        let mut week = empty_week();

        add_seconds(&mut week, 2, 10);
        add_seconds(&mut week, 2, 10);

        // Two 10-second samples: round((10/3600) * 2) at the bucket precision.
        assert!(approx_eq(week[2].hours, 0.0056), "got {}", week[2].hours);
    }

    #[test]
    fn thirty_seconds_is_eighty_three_ten_thousandths() {
        assert!(approx_eq(seconds_to_hours(30), 0.0083));
    }

    #[test]
    fn rounding_keeps_small_samples_visible() {
        // A single 5-second sample must not round away to zero.
        assert!(seconds_to_hours(5) > 0.0);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut week = empty_week();
        add_seconds(&mut week, 7, 3600);
        assert!(week.iter().all(|b| b.hours == 0.0));
    }

    #[test]
    fn bucket_serialization_keys_are_stable() {
        let week = empty_week();
        let json = serde_json::to_value(&week).expect("serializes");
        assert_eq!(json[0]["day"], "Mon");
        assert_eq!(json[0]["hours"], 0.0);
    }
}
