//! Clock and nonce ports.
//!
//! Request signing needs two sources of freshness: the current wall-clock
//! time and a single-use random value. Both are injected so signatures can
//! be reproduced in tests.

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Source of single-use nonces.
///
/// Every call must return a value that has not been returned before.
pub trait NonceSource: Send + Sync {
    /// Returns a fresh nonce.
    fn next_nonce(&self) -> String;
}
