//! System-backed clock and nonce sources, plus fixed doubles for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::{Clock, NonceSource};

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUID nonces.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNonceSource;

impl NonceSource for UuidNonceSource {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Deterministic nonces: `<prefix>-0`, `<prefix>-1`, ...
#[derive(Debug, Default)]
pub struct SequentialNonceSource {
    prefix: String,
    next: AtomicU64,
}

impl SequentialNonceSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl NonceSource for SequentialNonceSource {
    fn next_nonce(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuid_nonces_are_unique() {
        let source = UuidNonceSource;
        let nonces: HashSet<String> = (0..100).map(|_| source.next_nonce()).collect();
        assert_eq!(nonces.len(), 100);
    }

    #[test]
    fn uuid_nonces_parse_as_uuids() {
        assert!(Uuid::parse_str(&UuidNonceSource.next_nonce()).is_ok());
    }

    #[test]
    fn sequential_nonces_count_up() {
        let source = SequentialNonceSource::new("nonce");
        assert_eq!(source.next_nonce(), "nonce-0");
        assert_eq!(source.next_nonce(), "nonce-1");
    }

    #[test]
    fn system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
