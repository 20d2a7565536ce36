//! Mentora domain core.
//!
//! Pure domain logic with zero internal dependencies: the package catalog,
//! entitlement evaluation, the playback sampler state machine, and the
//! weekday activity-bucket math. Everything here is synchronous and
//! store-agnostic so it can be unit-tested without a database or a live
//! media element.

pub mod activity;
pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod sampler;
pub mod types;

pub use error::CoreError;
