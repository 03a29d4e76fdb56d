//! 15-minute grid primitives.
//!
//! All scheduling arithmetic happens on a 15-minute grid: starts round
//! forward, ends round back, and durations are positive multiples of 15.
//! Grid operations zero out sub-minute fields.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Grid step in minutes.
pub const GRID_MINUTES: i64 = 15;

const GRID_SECS: i64 = GRID_MINUTES * 60;

/// Round back to the previous grid boundary (identity when already aligned).
pub fn floor_15(t: DateTime<Utc>) -> DateTime<Utc> {
    let secs = t.timestamp();
    let floored = secs - secs.rem_euclid(GRID_SECS);
    DateTime::from_timestamp(floored, 0).unwrap_or(t)
}

/// Round forward to the next grid boundary (identity when already aligned).
pub fn ceil_15(t: DateTime<Utc>) -> DateTime<Utc> {
    if is_aligned(t) {
        t
    } else {
        floor_15(t) + Duration::minutes(GRID_MINUTES)
    }
}

/// Round a minute count to the nearest multiple of 15, with a floor of 15.
pub fn round_15(minutes: i64) -> i64 {
    let rounded = (minutes + GRID_MINUTES / 2) / GRID_MINUTES * GRID_MINUTES;
    rounded.max(GRID_MINUTES)
}

/// Whether a moment sits exactly on a grid boundary.
pub fn is_aligned(t: DateTime<Utc>) -> bool {
    t.timestamp().rem_euclid(GRID_SECS) == 0 && t.timestamp_subsec_nanos() == 0
}

/// Half-open interval intersection with strictly positive measure.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Whole minutes from `start` to `end` (negative when `end` precedes `start`).
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes()
}

/// Midnight of the calendar day containing `t`.
pub fn start_of_day(t: DateTime<Utc>) -> DateTime<Utc> {
    t.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Last second of the given calendar day; deadlines are interpreted here.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc() + Duration::seconds(86_399)
}
