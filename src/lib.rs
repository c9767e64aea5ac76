//! Praytime: Islamic prayer times from solar position astronomy
//!
//! This crate computes the seven daily times (Fajr, Sunrise, Dhuhr, Asr,
//! Sunset, Maghrib and Isha) for a calendar date, a geographic coordinate and
//! a time zone offset. The sun is modelled with a low-precision ephemeris
//! that is accurate to a few arc-minutes, which is well inside the one minute
//! resolution of the output.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use praytime::{CalculationMethod, Event, PrayTime};
//!
//! let mut pt = PrayTime::new();
//! pt.set_calc_method(CalculationMethod::Makkah);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let schedule = pt.compute_schedule(date, 21.4225, 39.8262, 3.0);
//! assert_eq!(schedule[Event::Dhuhr].to_string(), "12:28");
//! ```

use thiserror::Error;

pub mod calendar;
pub mod config;
pub mod constants;
pub mod engine;
pub mod format;
pub mod methods;
pub mod schedule;
pub mod solver;
pub mod sun;
pub mod trig;

// Re-export commonly used types
pub use config::{AsrJuristic, Config, HighLatitudeMethod, TimeFormat, TuningOffsets};
pub use constants::{INVALID_TIME, TIME_NAMES};
pub use engine::PrayTime;
pub use methods::{CalculationMethod, MethodParams, ParamOverride, Twilight};
pub use schedule::{DayTimes, Event, Schedule, TimeValue};

/// Main error type for the praytime library
#[derive(Debug, Error, PartialEq)]
pub enum PrayTimeError {
    #[error("Invalid {kind} value: {value}")]
    InvalidConfig {
        /// Which setting was being selected
        kind: &'static str,
        /// The rejected raw value
        value: String,
    },

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Result type for praytime operations
pub type Result<T> = std::result::Result<T, PrayTimeError>;

impl PrayTimeError {
    pub(crate) fn invalid_config(kind: &'static str, value: impl ToString) -> Self {
        PrayTimeError::InvalidConfig {
            kind,
            value: value.to_string(),
        }
    }
}
