//! Date and time utilities.

use std::{ops, time::Duration};

/// UTC date and time with a millisecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateTime(time::OffsetDateTime);

impl DateTime {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        let now = time::OffsetDateTime::now_utc();
        Self::from_unix_timestamp_millis(Self::millis_of(now))
            .unwrap_or(Self(now))
    }

    /// Creates a new [`DateTime`] from the provided amount of milliseconds
    /// since the Unix epoch.
    ///
    /// [`None`] is returned if the timestamp is out of range.
    #[must_use]
    pub fn from_unix_timestamp_millis(millis: i64) -> Option<Self> {
        time::OffsetDateTime::from_unix_timestamp_nanos(
            i128::from(millis) * 1_000_000,
        )
        .ok()
        .map(Self)
    }

    /// Returns the amount of milliseconds since the Unix epoch.
    #[must_use]
    pub fn unix_timestamp_millis(&self) -> i64 {
        Self::millis_of(self.0)
    }

    /// Truncates the provided [`time::OffsetDateTime`] to milliseconds.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "milliseconds of any representable date fit `i64`"
    )]
    fn millis_of(dt: time::OffsetDateTime) -> i64 {
        (dt.unix_timestamp_nanos() / 1_000_000) as i64
    }
}

impl ops::Add<Duration> for DateTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}
