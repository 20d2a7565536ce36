//! The package catalog: the registry of purchasable tiers.
//!
//! The catalog is an immutable configuration table injected wherever
//! entitlement decisions are made, never ambient global state, so tests can
//! supply alternate catalogs deterministically.

use std::collections::BTreeSet;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Package
// ---------------------------------------------------------------------------

/// The set of course ids a package unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseSet {
    /// Universal access: every course id, including courses added later.
    All,
    /// An explicit set of course ids.
    Only(BTreeSet<String>),
}

impl CourseSet {
    /// Build an explicit course set from string-ish ids.
    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CourseSet::Only(ids.into_iter().map(Into::into).collect())
    }

    /// Whether this set grants access to `course_id`.
    pub fn contains(&self, course_id: &str) -> bool {
        match self {
            CourseSet::All => true,
            CourseSet::Only(ids) => ids.contains(course_id),
        }
    }
}

/// Validity window of a package, counted from the purchase instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageDuration {
    Lifetime,
    Days(u32),
}

/// An immutable catalog entry for a purchasable tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Price in integer cents. Unique across the catalog.
    pub price_cents: i64,
    pub courses: CourseSet,
    pub duration: PackageDuration,
}

// ---------------------------------------------------------------------------
// PackageCatalog
// ---------------------------------------------------------------------------

/// Ordered, immutable registry of purchasable packages.
#[derive(Debug, Clone)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    /// Build a catalog, validating that ids and price points are unique.
    ///
    /// Price uniqueness matters because checkout flows resolve the purchased
    /// package from the charged amount.
    pub fn new(packages: Vec<Package>) -> Result<Self, CoreError> {
        let mut ids = BTreeSet::new();
        let mut prices = BTreeSet::new();

        for package in &packages {
            if !ids.insert(package.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate package id: {}",
                    package.id
                )));
            }
            if !prices.insert(package.price_cents) {
                return Err(CoreError::Validation(format!(
                    "Duplicate package price point: {}",
                    package.price_cents
                )));
            }
        }

        Ok(Self { packages })
    }

    /// The production catalog.
    ///
    /// # Panics
    ///
    /// Panics at startup if the built-in entries violate the catalog
    /// invariants, which is the desired behaviour -- we want a bad catalog
    /// to fail fast.
    pub fn builtin() -> Self {
        Self::new(vec![
            Package {
                id: "beginner".to_string(),
                name: "Beginner".to_string(),
                price_cents: 4_900,
                courses: CourseSet::only(["foundations"]),
                duration: PackageDuration::Days(180),
            },
            Package {
                id: "advanced".to_string(),
                name: "Advanced".to_string(),
                price_cents: 14_900,
                courses: CourseSet::only(["foundations", "advanced-track"]),
                duration: PackageDuration::Days(365),
            },
            Package {
                id: "supreme".to_string(),
                name: "Supreme".to_string(),
                price_cents: 29_900,
                courses: CourseSet::All,
                duration: PackageDuration::Lifetime,
            },
        ])
        .expect("built-in catalog must satisfy catalog invariants")
    }

    /// Find a package by its id.
    pub fn lookup_by_id(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Find the package sold at a given price point.
    pub fn lookup_by_price(&self, price_cents: i64) -> Option<&Package> {
        self.packages.iter().find(|p| p.price_cents == price_cents)
    }

    /// All packages in catalog order.
    pub fn all(&self) -> &[Package] {
        &self.packages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
