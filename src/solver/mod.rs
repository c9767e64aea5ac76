//! Solar altitude to clock time solver
//!
//! All results are in local apparent solar hours for the meridian the solver
//! was built for. Shifting them to the observer's zone is the engine's job.

use crate::constants::{DEGREES_PER_HOUR, HORIZON_DEPRESSION};
use crate::sun::sun_position;
use crate::trig::{darccos, darccot, dcos, dsin, dtan, normalize_hour};

/// Solves event times for one observer on one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSolver {
    /// Julian date of the day, shifted to the observer's meridian
    pub julian_day: f64,
    /// Observer latitude in degrees
    pub latitude: f64,
}

impl TimeSolver {
    /// Create a solver for a meridian-shifted Julian date and a latitude
    pub fn new(julian_day: f64, latitude: f64) -> Self {
        Self {
            julian_day,
            latitude,
        }
    }

    /// Local apparent noon (Dhuhr, Zawal)
    ///
    /// `t` is the fraction of the day at which the sun is sampled.
    pub fn mid_day(&self, t: f64) -> f64 {
        let eqt = sun_position(self.julian_day + t).equation_of_time;
        normalize_hour(12.0 - eqt)
    }

    /// Time at which the sun crosses altitude `-g`
    ///
    /// Angles above 90 describe the morning branch: `180 - g` is the same
    /// depression before noon. Returns NaN when the sun never reaches the
    /// requested altitude on this day.
    pub fn time_for_angle(&self, g: f64, t: f64) -> f64 {
        let d = sun_position(self.julian_day + t).declination;
        let z = self.mid_day(t);
        let cos_h = (-dsin(g) - dsin(d) * dsin(self.latitude)) / (dcos(d) * dcos(self.latitude));
        let v = darccos(cos_h) / DEGREES_PER_HOUR;
        if g > 90.0 {
            z - v
        } else {
            z + v
        }
    }

    /// Asr begins when an object's shadow reaches `step` times its height
    /// plus its noon shadow
    ///
    /// Shafii uses step 1, Hanafi step 2.
    pub fn asr_time(&self, step: f64, t: f64) -> f64 {
        let d = sun_position(self.julian_day + t).declination;
        let x = step + dtan((self.latitude - d).abs());
        let g = -darccot(x);
        self.time_for_angle(g, t)
    }

    /// Sunrise, with the standard horizon depression
    pub fn sunrise(&self, t: f64) -> f64 {
        self.time_for_angle(180.0 - HORIZON_DEPRESSION, t)
    }

    /// Sunset, with the standard horizon depression
    pub fn sunset(&self, t: f64) -> f64 {
        self.time_for_angle(HORIZON_DEPRESSION, t)
    }
}
