/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Instants used in entitlement math are epoch milliseconds.
pub type EpochMillis = i64;

/// One day in epoch milliseconds.
pub const MILLIS_PER_DAY: i64 = 86_400_000;
