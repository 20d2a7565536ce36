//! Entitlement evaluation: which package is active for a student, and
//! whether it grants access to a given course.
//!
//! All expiry math is done in epoch milliseconds with day durations
//! converted via [`MILLIS_PER_DAY`]. The evaluator is pure: time is always
//! an explicit argument.

use crate::catalog::{Package, PackageCatalog, PackageDuration};
use crate::types::{EpochMillis, MILLIS_PER_DAY};

// ---------------------------------------------------------------------------
// Purchase records
// ---------------------------------------------------------------------------

/// Status of a purchase record as written at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Active,
    /// Any non-active status (refunded, chargeback, pending, ...).
    Other,
}

impl PurchaseStatus {
    /// Parse a stored status string. Anything but `"active"` is [`Other`].
    ///
    /// [`Other`]: PurchaseStatus::Other
    pub fn parse(status: &str) -> Self {
        if status == "active" {
            PurchaseStatus::Active
        } else {
            PurchaseStatus::Other
        }
    }
}

/// The slice of a stored transaction the evaluator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub package_id: String,
    pub purchased_at: EpochMillis,
    pub status: PurchaseStatus,
}

// ---------------------------------------------------------------------------
// EntitlementEvaluator
// ---------------------------------------------------------------------------

/// Evaluates package activity and course access against an injected catalog.
#[derive(Debug, Clone, Copy)]
pub struct EntitlementEvaluator<'a> {
    catalog: &'a PackageCatalog,
}

impl<'a> EntitlementEvaluator<'a> {
    pub fn new(catalog: &'a PackageCatalog) -> Self {
        Self { catalog }
    }

    /// Whether a purchase of `package_id` made at `purchased_at` is still
    /// active at `now`.
    ///
    /// Lifetime packages are always active. For day-limited packages the
    /// window is half-open: the exact expiry instant is already inactive.
    /// Unknown package ids are never active.
    pub fn is_package_active(
        &self,
        purchased_at: EpochMillis,
        package_id: &str,
        now: EpochMillis,
    ) -> bool {
        let Some(package) = self.catalog.lookup_by_id(package_id) else {
            return false;
        };
        match package.duration {
            PackageDuration::Lifetime => true,
            PackageDuration::Days(days) => now < purchased_at + i64::from(days) * MILLIS_PER_DAY,
        }
    }

    /// The expiry instant of a purchase, or `None` for lifetime packages
    /// and unknown package ids.
    pub fn expires_at(&self, purchased_at: EpochMillis, package_id: &str) -> Option<EpochMillis> {
        match self.catalog.lookup_by_id(package_id)?.duration {
            PackageDuration::Lifetime => None,
            PackageDuration::Days(days) => Some(purchased_at + i64::from(days) * MILLIS_PER_DAY),
        }
    }

    /// Whether the resolved active package grants access to `course_id`.
    ///
    /// No active package or an unknown package id means no access.
    pub fn has_access(&self, active_package_id: Option<&str>, course_id: &str) -> bool {
        let Some(package_id) = active_package_id else {
            return false;
        };
        match self.catalog.lookup_by_id(package_id) {
            Some(package) => package.courses.contains(course_id),
            None => false,
        }
    }

    /// The first purchase in caller-supplied order that is status-active and
    /// not expired, with its resolved package.
    ///
    /// Callers must supply purchases in a stable, meaningful order
    /// (most-recent-first by convention); the evaluator does not re-sort.
    /// Purchases referencing unknown package ids are silently skipped.
    pub fn resolve_active_purchase<'p>(
        &self,
        purchases: &'p [PurchaseRecord],
        now: EpochMillis,
    ) -> Option<(&'a Package, &'p PurchaseRecord)> {
        purchases
            .iter()
            .filter(|p| p.status == PurchaseStatus::Active)
            .find(|p| self.is_package_active(p.purchased_at, &p.package_id, now))
            .and_then(|p| self.catalog.lookup_by_id(&p.package_id).map(|pkg| (pkg, p)))
    }

    /// The active package for a set of purchases, first-qualifying wins.
    pub fn resolve_active_package(
        &self,
        purchases: &[PurchaseRecord],
        now: EpochMillis,
    ) -> Option<&'a Package> {
        self.resolve_active_purchase(purchases, now).map(|(pkg, _)| pkg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
