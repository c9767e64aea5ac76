//! Constants module for prayer time calculations

use std::f64::consts::PI;

// Time constants
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Hours in a day
pub const DAY_H: f64 = 24.0;
/// Minutes in an hour
pub const HOUR_MIN: f64 = 60.0;
/// Degrees of hour angle per hour of time
pub const DEGREES_PER_HOUR: f64 = 15.0;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Apparent depression of the solar limb at sunrise and sunset (refraction
/// plus semi-diameter), in degrees
pub const HORIZON_DEPRESSION: f64 = 0.833;

// Schedule defaults
/// Initial clock-hour guesses for each event, before the first iteration
pub const DEFAULT_TIMES: [f64; 7] = [5.0, 6.0, 12.0, 13.0, 18.0, 18.0, 18.0];
/// Number of refinement passes run by default
pub const DEFAULT_ITERATIONS: usize = 1;
/// The string used for times that have no solution
pub const INVALID_TIME: &str = "-----";
/// Display labels for the seven events, in schedule order
pub const TIME_NAMES: [&str; 7] = [
    "Fajr", "Sunrise", "Dhuhr", "Asr", "Sunset", "Maghrib", "Isha",
];

// High latitude fallbacks
/// Isha angle used for night portions when Isha is minutes-based
pub const FALLBACK_ISHA_ANGLE: f64 = 18.0;
/// Maghrib angle used for night portions when Maghrib is minutes-based
pub const FALLBACK_MAGHRIB_ANGLE: f64 = 4.0;
/// Night portion of the one-seventh rule
pub const ONE_SEVENTH: f64 = 0.14286;
