//! Timestamp prefixes.
//!
//! Raw form is `[ 1234 ] `, formatted form is `[ HH:MM:SS.mmm ] `.
//! Hours count elapsed uptime and do not wrap at 24, so the hour field
//! grows past two digits on long runs.

use core::fmt;

/// Timestamp prefix for a given elapsed time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    pub millis: u64,
    pub formatted: bool,
}

impl Timestamp {
    pub const fn raw(millis: u64) -> Self {
        Self { millis, formatted: false }
    }

    pub const fn formatted(millis: u64) -> Self {
        Self { millis, formatted: true }
    }

    /// (hours, minutes, seconds, milliseconds)
    pub const fn split(&self) -> (u64, u64, u64, u64) {
        let total_seconds = self.millis / 1000;
        (
            total_seconds / 3600,
            (total_seconds / 60) % 60,
            total_seconds % 60,
            self.millis % 1000,
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.formatted {
            let (hours, minutes, seconds, millis) = self.split();
            write!(f, "[ {:02}:{:02}:{:02}.{:03} ] ", hours, minutes, seconds, millis)
        } else {
            write!(f, "[ {} ] ", self.millis)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
