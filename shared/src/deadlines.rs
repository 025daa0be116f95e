//! # Named RPC Deadlines
//!
//! Every inter-service call and every transactional operation runs under
//! a deadline, so a downed peer or a contended row lock surfaces as
//! `DEADLINE_EXCEEDED` rather than hanging a request indefinitely. These
//! constants are the single source of truth for both
//! the `reqwest::Client` timeouts used by the inter-service clients and the
//! `SET LOCAL statement_timeout` issued at the top of each transaction.

use std::time::Duration;

/// Default deadline for a simple, single-table read or write RPC.
pub const RPC_DEFAULT: Duration = Duration::from_secs(5);

/// Deadline for a transactional operation that takes row locks and may
/// call a peer service mid-transaction (`EnrollAll`, `Drop`,
/// `OverrideEnrollment`).
pub const RPC_TRANSACTIONAL: Duration = Duration::from_secs(15);

/// Deadline for the duration of an entire `UploadGrades` stream, not a
/// single frame.
pub const RPC_UPLOAD_STREAM: Duration = Duration::from_secs(30);

/// Renders a `Duration` as whole seconds for a `SET LOCAL statement_timeout`
/// statement, which Postgres expects in milliseconds.
pub fn as_statement_timeout_millis(deadline: Duration) -> i64 {
    deadline.as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_timeout_conversion() {
        assert_eq!(as_statement_timeout_millis(RPC_DEFAULT), 5_000);
        assert_eq!(as_statement_timeout_millis(RPC_TRANSACTIONAL), 15_000);
    }
}
