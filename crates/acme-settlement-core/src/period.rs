//! Settlement period derivation.
//!
//! A settlement window for a date runs from the last instant of the prior
//! calendar day to the last instant of the settlement date, both in the
//! merchant's timezone. The window deliberately spans one day boundary
//! rather than midnight-to-midnight.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// An unrecognized IANA timezone name.
///
/// Never fatal: callers fall back to UTC and log a warning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized timezone: {0}")]
pub struct InvalidTimezone(pub String);

/// Resolve an IANA timezone name.
///
/// # Errors
///
/// Returns [`InvalidTimezone`] when the name is not in the tz database.
pub fn resolve_timezone(name: &str) -> Result<Tz, InvalidTimezone> {
    name.parse::<Tz>()
        .map_err(|_| InvalidTimezone(name.to_string()))
}

/// The instant window over which transactions are attributed to a
/// settlement date.
///
/// Both bounds are offset-aware, so ordering and equality account for the
/// timezone offset rather than the wall-clock fields alone. Invariant:
/// `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPeriod {
    /// Last instant of the day before the settlement date.
    pub start: DateTime<FixedOffset>,

    /// Last instant of the settlement date.
    pub end: DateTime<FixedOffset>,
}

impl SettlementPeriod {
    /// Derive the settlement window for a date in a resolved timezone.
    ///
    /// # Panics
    ///
    /// Panics if `date` is the first representable calendar date, which has
    /// no preceding day.
    #[must_use]
    pub fn for_date(date: NaiveDate, tz: Tz) -> Self {
        let previous_day = date.pred_opt().expect("date has a preceding day");
        Self {
            start: close_of_day(previous_day, tz),
            end: close_of_day(date, tz),
        }
    }
}

/// The last representable instant of `date` in `tz`.
fn close_of_day(date: NaiveDate, tz: Tz) -> DateTime<FixedOffset> {
    let wall = date
        .and_hms_micro_opt(23, 59, 59, 999_999)
        .expect("in-range wall clock");

    match tz.from_local_datetime(&wall) {
        LocalResult::Single(instant) => instant.fixed_offset(),
        // A fold repeats the wall clock; take the later pass.
        LocalResult::Ambiguous(_, latest) => latest.fixed_offset(),
        // A gap skipped the wall clock entirely; pin to its UTC reading.
        LocalResult::None => tz.from_utc_datetime(&wall).fixed_offset(),
    }
}
