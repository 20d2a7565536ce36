//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod enrollment_repo;
pub mod partner_repo;
pub mod payout_repo;
pub mod student_repo;
pub mod transaction_repo;

pub use dashboard_repo::DashboardRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use partner_repo::PartnerRepo;
pub use payout_repo::PayoutRepo;
pub use student_repo::StudentRepo;
pub use transaction_repo::TransactionRepo;
