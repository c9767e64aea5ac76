//! Low precision solar ephemeris
//!
//! Implements the U.S. Naval Observatory "approximate solar coordinates"
//! series. Between 1950 and 2050 it stays within about one arc-minute of the
//! full theory, far below the one minute rounding of prayer times.

use crate::constants::{DEGREES_PER_HOUR, J2000};
use crate::trig::{darcsin, darctan2, dcos, dsin, normalize_angle, normalize_hour};

/// Apparent solar coordinates needed by the time solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Declination in degrees
    pub declination: f64,
    /// Equation of time in hours (apparent minus mean solar time)
    pub equation_of_time: f64,
}

/// Compute declination and equation of time at a Julian date
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000;

    // Mean anomaly and mean longitude
    let g = normalize_angle(357.529 + 0.985_600_28 * d);
    let q = normalize_angle(280.459 + 0.985_647_36 * d);
    // Geocentric apparent ecliptic longitude
    let l = normalize_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));

    // Mean obliquity of the ecliptic
    let e = 23.439 - 0.000_000_36 * d;

    let declination = darcsin(dsin(e) * dsin(l));
    let ra = normalize_hour(darctan2(dcos(e) * dsin(l), dcos(l)) / DEGREES_PER_HOUR);
    // q and ra wrap at different instants near the March equinox, so fold
    // the difference back into [-12, 12)
    let equation_of_time = normalize_hour(q / DEGREES_PER_HOUR - ra + 12.0) - 12.0;

    SunPosition {
        declination,
        equation_of_time,
    }
}

/// Solar declination in degrees
pub fn sun_declination(jd: f64) -> f64 {
    sun_position(jd).declination
}

/// Equation of time in hours
pub fn equation_of_time(jd: f64) -> f64 {
    sun_position(jd).equation_of_time
}
