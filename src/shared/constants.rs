/// Number of rows returned by the admin audit-trail endpoints.
pub const AUDIT_TRAIL_LIMIT: i64 = 100;

/// Number of rows of each analytics breakdown returned by `/admin/analytics`.
pub const ANALYTICS_TOP_N: i64 = 10;

/// Capacity of the in-memory fallback audit sink. Older entries are dropped
/// once the cap is reached; the buffer is never read back by handlers.
pub const TRANSIENT_AUDIT_CAPACITY: usize = 1000;
