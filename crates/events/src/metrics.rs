//! Pure admin metric aggregation.
//!
//! Metrics are recomputed from scratch on every change notification: the
//! functions here take full collection snapshots and hold no state, so a
//! given input set always produces the same output.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use mentora_core::types::DbId;
use mentora_db::models::enrollment::Enrollment;
use mentora_db::models::partner::Partner;
use mentora_db::models::payout::{Payout, PAYOUT_STATUS_PENDING};
use mentora_db::models::student::Student;
use mentora_db::models::transaction::{Transaction, TRANSACTION_STATUS_ACTIVE};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Metric types
// ---------------------------------------------------------------------------

/// Counts split by acquisition source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceBreakdown {
    pub total: u64,
    pub direct: u64,
    pub partner: u64,
}

impl SourceBreakdown {
    fn count(&mut self, partner_sourced: bool) {
        self.total += 1;
        if partner_sourced {
            self.partner += 1;
        } else {
            self.direct += 1;
        }
    }
}

/// Revenue split in integer cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevenueBreakdown {
    pub total_cents: i64,
    pub direct_cents: i64,
    pub partner_cents: i64,
    /// Commission owed on partner-sourced revenue.
    pub partner_commission_cents: i64,
}

/// Aggregated admin metrics over the watched collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub revenue: RevenueBreakdown,
    pub enrollments: SourceBreakdown,
    pub students: SourceBreakdown,
}

/// Summary of payouts awaiting settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PayoutSummary {
    pub pending_count: u64,
    pub pending_cents: i64,
}

/// Full snapshot published to admin consumers.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSnapshot {
    pub metrics: Metrics,
    pub pending_payouts: PayoutSummary,
    pub computed_at: DateTime<Utc>,
}

impl AdminSnapshot {
    /// The all-zero snapshot used before the first computation.
    pub fn empty() -> Self {
        Self {
            metrics: Metrics::default(),
            pending_payouts: PayoutSummary::default(),
            computed_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Compute admin metrics from full collection snapshots.
///
/// A student with a `partner_id` is partner-sourced; enrollments and
/// transactions inherit the source of their student. Commission applies
/// each partner's `commission_rate_pct` to partner-sourced active revenue
/// (integer cents, truncating division). Transactions whose status is not
/// active contribute nothing.
pub fn compute_metrics(
    transactions: &[Transaction],
    students: &[Student],
    partners: &[Partner],
    enrollments: &[Enrollment],
) -> Metrics {
    let commission_rate: HashMap<DbId, i64> = partners
        .iter()
        .map(|p| (p.id, i64::from(p.commission_rate_pct)))
        .collect();
    let student_partner: HashMap<DbId, Option<DbId>> =
        students.iter().map(|s| (s.id, s.partner_id)).collect();
    let source_of = |student_id: DbId| student_partner.get(&student_id).copied().flatten();

    let mut metrics = Metrics::default();

    for student in students {
        metrics.students.count(student.partner_id.is_some());
    }

    for enrollment in enrollments {
        metrics
            .enrollments
            .count(source_of(enrollment.student_id).is_some());
    }

    for tx in transactions.iter().filter(|t| t.status == TRANSACTION_STATUS_ACTIVE) {
        metrics.revenue.total_cents += tx.amount_cents;
        match source_of(tx.student_id) {
            Some(partner_id) => {
                metrics.revenue.partner_cents += tx.amount_cents;
                if let Some(rate) = commission_rate.get(&partner_id) {
                    metrics.revenue.partner_commission_cents += tx.amount_cents * rate / 100;
                }
            }
            None => metrics.revenue.direct_cents += tx.amount_cents,
        }
    }

    metrics
}

/// Summarize payouts awaiting settlement.
pub fn summarize_payouts(payouts: &[Payout]) -> PayoutSummary {
    let pending = payouts.iter().filter(|p| p.status == PAYOUT_STATUS_PENDING);
    let mut summary = PayoutSummary::default();
    for payout in pending {
        summary.pending_count += 1;
        summary.pending_cents += payout.amount_cents;
    }
    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(id: DbId, partner_id: Option<DbId>) -> Student {
        Student {
            id,
            email: format!("s{id}@test.io"),
            display_name: format!("Student {id}"),
            partner_id,
            created_at: Utc::now(),
        }
    }

    fn partner(id: DbId, commission_rate_pct: i32) -> Partner {
        Partner {
            id,
            name: format!("Partner {id}"),
            code: format!("P{id}"),
            commission_rate_pct,
            created_at: Utc::now(),
        }
    }

    fn transaction(student_id: DbId, amount_cents: i64, status: &str) -> Transaction {
        Transaction {
            id: 0,
            student_id,
            package_id: "beginner".to_string(),
            amount_cents,
            status: status.to_string(),
            purchased_at: Utc::now(),
            expires_at: None,
        }
    }

    fn enrollment(student_id: DbId) -> Enrollment {
        Enrollment {
            id: 0,
            student_id,
            course_id: "foundations".to_string(),
            progress_percent: 0,
            completed: false,
            enrolled_at: Utc::now(),
            last_active_at: Utc::now(),
            last_playback_position_seconds: 0,
        }
    }

    fn payout(amount_cents: i64, status: &str) -> Payout {
        Payout {
            id: 0,
            partner_id: 1,
            amount_cents,
            status: status.to_string(),
            requested_at: Utc::now(),
            paid_at: None,
        }
    }

    #[test]
    fn empty_sets_produce_zero_metrics() {
        let metrics = compute_metrics(&[], &[], &[], &[]);
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn revenue_splits_by_student_source() {
        let students = vec![student(1, None), student(2, Some(10))];
        let partners = vec![partner(10, 20)];
        let transactions = vec![
            transaction(1, 10_000, TRANSACTION_STATUS_ACTIVE),
            transaction(2, 5_000, TRANSACTION_STATUS_ACTIVE),
        ];

        let metrics = compute_metrics(&transactions, &students, &partners, &[]);

        assert_eq!(metrics.revenue.total_cents, 15_000);
        assert_eq!(metrics.revenue.direct_cents, 10_000);
        assert_eq!(metrics.revenue.partner_cents, 5_000);
        assert_eq!(metrics.revenue.partner_commission_cents, 1_000);
    }

    #[test]
    fn commission_truncates_to_whole_cents() {
        let students = vec![student(1, Some(10))];
        let partners = vec![partner(10, 10)];
        let transactions = vec![transaction(1, 3_333, TRANSACTION_STATUS_ACTIVE)];

        let metrics = compute_metrics(&transactions, &students, &partners, &[]);

        assert_eq!(metrics.revenue.partner_commission_cents, 333);
    }

    #[test]
    fn non_active_transactions_contribute_nothing() {
        let students = vec![student(1, None)];
        let transactions = vec![
            transaction(1, 10_000, "refunded"),
            transaction(1, 2_000, TRANSACTION_STATUS_ACTIVE),
        ];

        let metrics = compute_metrics(&transactions, &students, &[], &[]);

        assert_eq!(metrics.revenue.total_cents, 2_000);
    }

    #[test]
    fn unknown_partner_still_counts_as_partner_revenue() {
        // The student is partner-sourced, but the partner row is missing
        // from the snapshot: revenue is attributed, commission is not.
        let students = vec![student(1, Some(99))];
        let transactions = vec![transaction(1, 1_000, TRANSACTION_STATUS_ACTIVE)];

        let metrics = compute_metrics(&transactions, &students, &[], &[]);

        assert_eq!(metrics.revenue.partner_cents, 1_000);
        assert_eq!(metrics.revenue.partner_commission_cents, 0);
    }

    #[test]
    fn student_and_enrollment_counts_split_by_source() {
        let students = vec![student(1, None), student(2, Some(10)), student(3, Some(10))];
        let enrollments = vec![enrollment(1), enrollment(2), enrollment(2)];

        let metrics = compute_metrics(&[], &students, &[], &enrollments);

        assert_eq!(metrics.students.total, 3);
        assert_eq!(metrics.students.direct, 1);
        assert_eq!(metrics.students.partner, 2);
        assert_eq!(metrics.enrollments.total, 3);
        assert_eq!(metrics.enrollments.direct, 1);
        assert_eq!(metrics.enrollments.partner, 2);
    }

    #[test]
    fn enrollment_of_unknown_student_counts_as_direct() {
        let enrollments = vec![enrollment(42)];

        let metrics = compute_metrics(&[], &[], &[], &enrollments);

        assert_eq!(metrics.enrollments.total, 1);
        assert_eq!(metrics.enrollments.direct, 1);
    }

    #[test]
    fn computation_is_deterministic() {
        let students = vec![student(1, Some(10))];
        let partners = vec![partner(10, 15)];
        let transactions = vec![transaction(1, 7_700, TRANSACTION_STATUS_ACTIVE)];
        let enrollments = vec![enrollment(1)];

        let a = compute_metrics(&transactions, &students, &partners, &enrollments);
        let b = compute_metrics(&transactions, &students, &partners, &enrollments);

        assert_eq!(a, b);
    }

    #[test]
    fn payout_summary_counts_only_pending() {
        let payouts = vec![
            payout(1_000, PAYOUT_STATUS_PENDING),
            payout(2_500, PAYOUT_STATUS_PENDING),
            payout(9_999, "paid"),
        ];

        let summary = summarize_payouts(&payouts);

        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.pending_cents, 3_500);
    }
}
