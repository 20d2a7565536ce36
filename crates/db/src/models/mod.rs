//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus wire views and create DTOs where the API needs
//! them. Wire views preserve the camelCase key contract of the previously
//! stored documents.

pub mod dashboard;
pub mod enrollment;
pub mod partner;
pub mod payout;
pub mod student;
pub mod transaction;
