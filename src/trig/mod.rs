//! Degree-based trigonometry and range reduction
//!
//! Every function here takes and returns degrees. The inverse functions follow
//! IEEE semantics outside their domain and return NaN, which the rest of the
//! crate treats as "this event has no solution today".

use crate::constants::{DAY_H, DEG2RAD, RAD2DEG};

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * DEG2RAD
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * RAD2DEG
}

/// Range reduce an angle to [0, 360)
pub fn normalize_angle(a: f64) -> f64 {
    wrap(a, 360.0)
}

/// Range reduce an hour value to [0, 24)
pub fn normalize_hour(a: f64) -> f64 {
    wrap(a, DAY_H)
}

fn wrap(a: f64, period: f64) -> f64 {
    let r = a - period * (a / period).floor();
    // floor() can leave r == period for tiny negative inputs
    if r >= period {
        r - period
    } else if r < 0.0 {
        r + period
    } else {
        r
    }
}

/// Positive wrapped difference from `t1` forward to `t2`, in hours
pub fn time_diff(t1: f64, t2: f64) -> f64 {
    normalize_hour(t2 - t1)
}

pub fn dsin(d: f64) -> f64 {
    deg_to_rad(d).sin()
}

pub fn dcos(d: f64) -> f64 {
    deg_to_rad(d).cos()
}

pub fn dtan(d: f64) -> f64 {
    deg_to_rad(d).tan()
}

/// Arcsine in degrees, NaN when |x| > 1
pub fn darcsin(x: f64) -> f64 {
    rad_to_deg(x.asin())
}

/// Arccosine in degrees, NaN when |x| > 1
pub fn darccos(x: f64) -> f64 {
    rad_to_deg(x.acos())
}

pub fn darctan(x: f64) -> f64 {
    rad_to_deg(x.atan())
}

/// Two-argument arctangent in degrees
pub fn darctan2(y: f64, x: f64) -> f64 {
    rad_to_deg(y.atan2(x))
}

/// Arc-cotangent in degrees, defined as atan2(1, x)
pub fn darccot(x: f64) -> f64 {
    rad_to_deg(1.0_f64.atan2(x))
}
