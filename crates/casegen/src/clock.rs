//! Clock abstraction for deterministic output.
//!
//! The only non-determinism in an emission is the current time (filename date
//! fragments, export timestamps, archive modification times). Emitters read it
//! through [`Clock`] so tests can pin it with [`FixedClock`].

use chrono::{DateTime, TimeZone, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;

    /// Current time as a UTC datetime
    fn now(&self) -> DateTime<Utc> {
        let ms = i64::try_from(self.now_ms()).unwrap_or(i64::MAX);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or_default()
    }

    /// `YYYYMMDD` fragment used in filenames
    fn date_fragment(&self) -> String {
        self.now().format("%Y%m%d").to_string()
    }

    /// RFC 3339 timestamp with millisecond precision
    fn iso8601(&self) -> String {
        self.now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    time_ms: u64,
}

impl FixedClock {
    /// Freeze at milliseconds since the Unix epoch
    #[must_use]
    pub const fn at_ms(time_ms: u64) -> Self {
        Self { time_ms }
    }

    /// Freeze at an RFC 3339 timestamp
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error for malformed input
    pub fn from_rfc3339(iso: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(iso)?;
        Ok(Self {
            time_ms: u64::try_from(dt.timestamp_millis()).unwrap_or(0),
        })
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.time_ms
    }
}
