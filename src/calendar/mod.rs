//! Calendar date and Julian date conversion functions
//!
//! This module converts Gregorian calendar dates to the Julian Day counts the
//! solar ephemeris is parameterised on.

use chrono::{Datelike, NaiveDate};

use crate::constants::{DAY_H, DEGREES_PER_HOUR};
use crate::{PrayTimeError, Result};

/// Convert (year, month, day) to a Julian date float at 0h UT
///
/// Uses the proleptic Gregorian calendar. The conversion is total: impossible
/// dates such as February 30 still produce a number, so callers holding
/// untrusted input should go through [`validate_date`] first.
pub fn julian_day(year: i32, month: i32, day: i32) -> f64 {
    let (year, month) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let a = (year as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year as f64 + 4716.0)).floor() + (30.6001 * (month as f64 + 1.0)).floor()
        + day as f64
        + b
        - 1524.5
}

/// Julian date of a chrono date at 0h UT
pub fn julian_day_from_date(date: NaiveDate) -> f64 {
    julian_day(date.year(), date.month() as i32, date.day() as i32)
}

/// Julian date shifted to the observer's meridian
///
/// The solver samples the sun at `jd + fraction_of_day`, so moving the origin
/// by `longitude / 360` days lines local solar noon up with fraction 0.5.
pub fn observation_julian_day(date: NaiveDate, longitude: f64) -> f64 {
    julian_day_from_date(date) - longitude / (DEGREES_PER_HOUR * DAY_H)
}

/// Check a (year, month, day) triple against the Gregorian calendar
pub fn validate_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(PrayTimeError::InvalidDate { year, month, day })
}

/// Format a date as a calendar date string (YYYY-MM-DD)
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
