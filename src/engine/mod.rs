//! Schedule assembly
//!
//! [`PrayTime`] turns a date and a location into the seven formatted times.
//! Each refinement pass runs four phases in a fixed order:
//!
//! 1. raw times in local apparent solar time, from the time solver
//! 2. shift to the zone's civil time, plus the Dhuhr and minutes-based rules
//! 3. high latitude correction of Fajr, Maghrib and Isha
//! 4. manual tuning offsets
//!
//! The raw times of one pass seed the sampling instants of the next, so
//! additional passes tighten the agreement between each event and the solar
//! declination used to compute it. One pass is already within a few seconds.

use chrono::{DateTime, NaiveDate, Offset, TimeZone};
use log::{debug, trace, warn};

use crate::calendar::{observation_julian_day, validate_date};
use crate::config::{AsrJuristic, Config, HighLatitudeMethod, TimeFormat, TuningOffsets};
use crate::constants::{
    DAY_H, DEFAULT_TIMES, DEGREES_PER_HOUR, FALLBACK_ISHA_ANGLE, FALLBACK_MAGHRIB_ANGLE, HOUR_MIN,
};
use crate::format::format_time;
use crate::methods::{CalculationMethod, ParamOverride, Twilight};
use crate::schedule::{DayTimes, Event, Schedule};
use crate::solver::TimeSolver;
use crate::trig::time_diff;
use crate::Result;

/// Observer meridian and clock for a single computation
#[derive(Debug, Clone, Copy)]
struct Observer {
    longitude: f64,
    time_zone: f64,
}

/// Prayer time calculator
#[derive(Debug, Clone, Default)]
pub struct PrayTime {
    config: Config,
    /// Zone-adjusted times of the last computation, before tuning
    current: Option<DayTimes>,
}

impl PrayTime {
    /// Create a calculator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator from an existing configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Zone and latitude adjusted times of the last computation, before
    /// tuning and formatting
    pub fn current_times(&self) -> Option<&DayTimes> {
        self.current.as_ref()
    }

    pub fn set_calc_method(&mut self, method: CalculationMethod) {
        self.config.set_calc_method(method);
    }

    pub fn set_asr_method(&mut self, juristic: AsrJuristic) {
        self.config.set_asr_method(juristic);
    }

    pub fn set_high_lats_method(&mut self, method: HighLatitudeMethod) {
        self.config.set_high_lats_method(method);
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.config.set_time_format(format);
    }

    pub fn set_dhuhr_minutes(&mut self, minutes: f64) {
        self.config.set_dhuhr_minutes(minutes);
    }

    pub fn set_custom_params(&mut self, overrides: ParamOverride) {
        self.config.set_custom_params(overrides);
    }

    pub fn set_fajr_angle(&mut self, angle: f64) {
        self.config.set_fajr_angle(angle);
    }

    pub fn set_maghrib_angle(&mut self, angle: f64) {
        self.config.set_maghrib_angle(angle);
    }

    pub fn set_maghrib_minutes(&mut self, minutes: f64) {
        self.config.set_maghrib_minutes(minutes);
    }

    pub fn set_isha_angle(&mut self, angle: f64) {
        self.config.set_isha_angle(angle);
    }

    pub fn set_isha_minutes(&mut self, minutes: f64) {
        self.config.set_isha_minutes(minutes);
    }

    pub fn tune(&mut self, offsets: TuningOffsets) {
        self.config.tune(offsets);
    }

    pub fn set_iterations(&mut self, iterations: usize) -> Result<()> {
        self.config.set_iterations(iterations)
    }

    pub fn set_invalid_time(&mut self, invalid_time: impl Into<String>) {
        self.config.set_invalid_time(invalid_time);
    }

    /// Return prayer times for a given date
    ///
    /// `latitude` and `longitude` are in degrees (north and east positive) and
    /// `time_zone` is the offset from UTC in hours.
    pub fn compute_schedule(
        &mut self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        time_zone: f64,
    ) -> Schedule {
        let tuned = self.compute_day_times(date, latitude, longitude, time_zone);
        self.format_times(&tuned)
    }

    /// Return prayer times for a (year, month, day) triple
    ///
    /// Fails with [`crate::PrayTimeError::InvalidDate`] if the triple is not
    /// a Gregorian date.
    pub fn compute_schedule_ymd(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        latitude: f64,
        longitude: f64,
        time_zone: f64,
    ) -> Result<Schedule> {
        let date = validate_date(year, month, day)?;
        Ok(self.compute_schedule(date, latitude, longitude, time_zone))
    }

    /// Return prayer times for the calendar day of `datetime`, in its own
    /// UTC offset
    pub fn compute_for_datetime<Tz: TimeZone>(
        &mut self,
        datetime: &DateTime<Tz>,
        latitude: f64,
        longitude: f64,
    ) -> Schedule {
        let offset = datetime.offset().fix().local_minus_utc() as f64 / 3600.0;
        self.compute_schedule(datetime.date_naive(), latitude, longitude, offset)
    }

    /// Tuned times in fractional hours, before formatting
    pub fn compute_day_times(
        &mut self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        time_zone: f64,
    ) -> DayTimes {
        let observer = Observer {
            longitude,
            time_zone,
        };
        let jd = observation_julian_day(date, longitude);
        let solver = TimeSolver::new(jd, latitude);
        debug!(
            "Computing {} at lat={}, lon={}, tz={} (JD {:.5}, method {})",
            date,
            latitude,
            longitude,
            time_zone,
            jd,
            self.config.method()
        );

        let mut times = DayTimes::new(DEFAULT_TIMES);
        let mut adjusted = times;
        let mut tuned = times;
        for pass in 0..self.config.iterations() {
            let raw = self.compute_times(&solver, &times);
            adjusted = self.adjust_times(&raw, &observer);
            tuned = self.tune_times(&adjusted);
            debug!("Pass {}: raw {:?}", pass + 1, raw.to_array());
            times = raw;
        }

        for (event, _) in tuned.iter().filter(|(_, value)| value.is_nan()) {
            warn!(
                "{} has no solution on {} at latitude {} ({:?} adjustment)",
                event,
                date,
                latitude,
                self.config.high_lats()
            );
        }

        self.current = Some(adjusted);
        tuned
    }

    /// Compute raw prayer times from the previous pass's estimates
    fn compute_times(&self, solver: &TimeSolver, times: &DayTimes) -> DayTimes {
        let t = times.map(|time| time / DAY_H);
        let params = self.config.params();

        let sunset = solver.sunset(t[Event::Sunset]);
        let mut raw = DayTimes::new([
            solver.time_for_angle(180.0 - params.fajr_angle, t[Event::Fajr]),
            solver.sunrise(t[Event::Sunrise]),
            solver.mid_day(t[Event::Dhuhr]),
            solver.asr_time(self.config.asr_juristic().shadow_step(), t[Event::Asr]),
            sunset,
            sunset,
            sunset,
        ]);
        // Minutes-based events stay on sunset until they are shifted
        if let Twilight::Angle(angle) = params.maghrib {
            raw[Event::Maghrib] = solver.time_for_angle(angle, t[Event::Maghrib]);
        }
        if let Twilight::Angle(angle) = params.isha {
            raw[Event::Isha] = solver.time_for_angle(angle, t[Event::Isha]);
        }

        for (event, value) in raw.iter() {
            trace!("raw {} = {}", event, value);
        }
        raw
    }

    /// Shift to zone time and apply the offset-based rules
    fn adjust_times(&self, raw: &DayTimes, observer: &Observer) -> DayTimes {
        let params = self.config.params();
        let shift = observer.time_zone - observer.longitude / DEGREES_PER_HOUR;
        let mut times = raw.map(|time| time + shift);

        times[Event::Dhuhr] += self.config.dhuhr_minutes() / HOUR_MIN;
        if let Twilight::Minutes(minutes) = params.maghrib {
            times[Event::Maghrib] = times[Event::Sunset] + minutes / HOUR_MIN;
        }
        if let Twilight::Minutes(minutes) = params.isha {
            times[Event::Isha] = times[Event::Maghrib] + minutes / HOUR_MIN;
        }

        if self.config.high_lats() != HighLatitudeMethod::None {
            times = self.adjust_high_lat_times(&times);
        }
        times
    }

    /// Adjust Fajr, Isha and Maghrib for locations in higher latitudes
    ///
    /// Each of them is kept within its night portion of the sunset-to-sunrise
    /// interval, and replaced outright when it has no solution.
    fn adjust_high_lat_times(&self, times: &DayTimes) -> DayTimes {
        let method = self.config.high_lats();
        let params = self.config.params();
        let mut adjusted = *times;

        let sunrise = times[Event::Sunrise];
        let sunset = times[Event::Sunset];
        let night = time_diff(sunset, sunrise);
        let portion = |angle: f64| method.night_portion(angle).unwrap_or(0.0) * night;

        let fajr_diff = portion(params.fajr_angle);
        let fajr = times[Event::Fajr];
        if fajr.is_nan() || time_diff(fajr, sunrise) > fajr_diff {
            adjusted[Event::Fajr] = sunrise - fajr_diff;
        }

        let isha_angle = params.isha.angle().unwrap_or(FALLBACK_ISHA_ANGLE);
        let isha_diff = portion(isha_angle);
        let isha = times[Event::Isha];
        if isha.is_nan() || time_diff(sunset, isha) > isha_diff {
            adjusted[Event::Isha] = sunset + isha_diff;
        }

        let maghrib_angle = params.maghrib.angle().unwrap_or(FALLBACK_MAGHRIB_ANGLE);
        let maghrib_diff = portion(maghrib_angle);
        let maghrib = times[Event::Maghrib];
        if maghrib.is_nan() || time_diff(sunset, maghrib) > maghrib_diff {
            adjusted[Event::Maghrib] = sunset + maghrib_diff;
        }

        debug!(
            "High latitude ({:?}): night {:.4}h, fajr {} -> {}, isha {} -> {}",
            method,
            night,
            fajr,
            adjusted[Event::Fajr],
            isha,
            adjusted[Event::Isha]
        );
        adjusted
    }

    /// Apply the manual tuning offsets
    fn tune_times(&self, times: &DayTimes) -> DayTimes {
        let offsets = self.config.offsets().to_array();
        let mut tuned = *times;
        for (slot, offset) in tuned.0.iter_mut().zip(offsets) {
            *slot += offset / HOUR_MIN;
        }
        tuned
    }

    fn format_times(&self, times: &DayTimes) -> Schedule {
        let format = self.config.time_format();
        let invalid = self.config.invalid_time();
        Schedule::new(times.0.map(|time| format_time(time, format, invalid)))
    }
}
