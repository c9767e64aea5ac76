//! Engine configuration
//!
//! A [`Config`] bundles every setting that changes the computed schedule. It
//! owns its own copy of the custom method parameters, so two engines never
//! share mutable state.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ITERATIONS, INVALID_TIME, ONE_SEVENTH};
use crate::methods::{CalculationMethod, MethodParams, ParamOverride, Twilight};
use crate::schedule::Event;
use crate::{PrayTimeError, Result};

/// Juristic methods for Asr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsrJuristic {
    /// Shafii, Maliki, Hanbali (standard)
    #[default]
    Shafii,
    /// Hanafi
    Hanafi,
}

impl AsrJuristic {
    /// Shadow length, in object heights, added to the noon shadow
    pub fn shadow_step(&self) -> f64 {
        match self {
            AsrJuristic::Shafii => 1.0,
            AsrJuristic::Hanafi => 2.0,
        }
    }
}

impl TryFrom<i32> for AsrJuristic {
    type Error = PrayTimeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(AsrJuristic::Shafii),
            1 => Ok(AsrJuristic::Hanafi),
            _ => Err(PrayTimeError::invalid_config("asr juristic method", value)),
        }
    }
}

impl FromStr for AsrJuristic {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "shafii" | "standard" => Ok(AsrJuristic::Shafii),
            "hanafi" => Ok(AsrJuristic::Hanafi),
            _ => Err(PrayTimeError::invalid_config("asr juristic method", s)),
        }
    }
}

/// Adjusting methods for higher latitudes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighLatitudeMethod {
    /// No adjustment
    #[default]
    None,
    /// Middle of the night
    MidNight,
    /// One seventh of the night
    OneSeventh,
    /// angle/60 of the night
    AngleBased,
}

impl HighLatitudeMethod {
    /// Fraction of the night allotted to a twilight of depression `angle`
    ///
    /// Returns `None` when no adjustment is configured.
    pub fn night_portion(&self, angle: f64) -> Option<f64> {
        match self {
            HighLatitudeMethod::None => None,
            HighLatitudeMethod::MidNight => Some(0.5),
            HighLatitudeMethod::OneSeventh => Some(ONE_SEVENTH),
            HighLatitudeMethod::AngleBased => Some(angle / 60.0),
        }
    }
}

impl TryFrom<i32> for HighLatitudeMethod {
    type Error = PrayTimeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(HighLatitudeMethod::None),
            1 => Ok(HighLatitudeMethod::MidNight),
            2 => Ok(HighLatitudeMethod::OneSeventh),
            3 => Ok(HighLatitudeMethod::AngleBased),
            _ => Err(PrayTimeError::invalid_config("high latitude method", value)),
        }
    }
}

impl FromStr for HighLatitudeMethod {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "none" => Ok(HighLatitudeMethod::None),
            "midnight" => Ok(HighLatitudeMethod::MidNight),
            "oneseventh" | "seventh" => Ok(HighLatitudeMethod::OneSeventh),
            "anglebased" | "angle" => Ok(HighLatitudeMethod::AngleBased),
            _ => Err(PrayTimeError::invalid_config("high latitude method", s)),
        }
    }
}

/// Output time formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// 24-hour format, "HH:MM"
    #[default]
    Time24,
    /// 12-hour format with suffix, "hh:mm am"
    Time12,
    /// 12-hour format with no suffix, "hh:mm"
    Time12NoSuffix,
    /// Fractional hours, unformatted
    Float,
}

impl TryFrom<i32> for TimeFormat {
    type Error = PrayTimeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(TimeFormat::Time24),
            1 => Ok(TimeFormat::Time12),
            2 => Ok(TimeFormat::Time12NoSuffix),
            3 => Ok(TimeFormat::Float),
            _ => Err(PrayTimeError::invalid_config("time format", value)),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "time24" => Ok(TimeFormat::Time24),
            "12h" | "time12" => Ok(TimeFormat::Time12),
            "12hns" | "time12ns" => Ok(TimeFormat::Time12NoSuffix),
            "float" => Ok(TimeFormat::Float),
            _ => Err(PrayTimeError::invalid_config("time format", s)),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeFormat::Time24 => "24h",
            TimeFormat::Time12 => "12h",
            TimeFormat::Time12NoSuffix => "12hns",
            TimeFormat::Float => "float",
        };
        f.write_str(name)
    }
}

/// Manual per-event corrections, in minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningOffsets {
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub sunset: f64,
    pub maghrib: f64,
    pub isha: f64,
}

impl TuningOffsets {
    /// Offsets in schedule order
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.fajr,
            self.sunrise,
            self.dhuhr,
            self.asr,
            self.sunset,
            self.maghrib,
            self.isha,
        ]
    }

    /// Offset of a single event
    pub fn get(&self, event: Event) -> f64 {
        self.to_array()[event.index()]
    }

    /// Replace the offset of a single event
    pub fn set(&mut self, event: Event, minutes: f64) {
        let slot = match event {
            Event::Fajr => &mut self.fajr,
            Event::Sunrise => &mut self.sunrise,
            Event::Dhuhr => &mut self.dhuhr,
            Event::Asr => &mut self.asr,
            Event::Sunset => &mut self.sunset,
            Event::Maghrib => &mut self.maghrib,
            Event::Isha => &mut self.isha,
        };
        *slot = minutes;
    }
}

/// Parse a tuning list such as `fajr=2,isha=-1.5`
impl FromStr for TuningOffsets {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut offsets = TuningOffsets::default();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (name, value) = item.split_once('=').ok_or_else(|| {
                PrayTimeError::ParseError(format!("expected event=minutes, got '{}'", item))
            })?;
            let event: Event = name.parse()?;
            let minutes: f64 = value.trim().parse().map_err(|_| {
                PrayTimeError::ParseError(format!("invalid minutes '{}' for {}", value, event))
            })?;
            offsets.set(event, minutes);
        }
        Ok(offsets)
    }
}

/// Settings for the prayer time engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    method: CalculationMethod,
    asr_juristic: AsrJuristic,
    high_lats: HighLatitudeMethod,
    time_format: TimeFormat,
    /// Minutes after mid-day for Dhuhr
    dhuhr_minutes: f64,
    offsets: TuningOffsets,
    /// Parameters used while `method` is `Custom`
    custom: MethodParams,
    /// Number of refinement passes per schedule
    #[serde(deserialize_with = "deserialize_iterations")]
    iterations: usize,
    invalid_time: String,
}

/// Reject a pass count of zero, which would leave the seed times in place
fn deserialize_iterations<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let iterations = usize::deserialize(deserializer)?;
    if iterations == 0 {
        return Err(de::Error::custom(PrayTimeError::invalid_config(
            "iteration count",
            iterations,
        )));
    }
    Ok(iterations)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: CalculationMethod::Jafari,
            asr_juristic: AsrJuristic::Shafii,
            high_lats: HighLatitudeMethod::None,
            time_format: TimeFormat::Time24,
            dhuhr_minutes: 0.0,
            offsets: TuningOffsets::default(),
            custom: CalculationMethod::Custom.default_params(),
            iterations: DEFAULT_ITERATIONS,
            invalid_time: INVALID_TIME.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: CalculationMethod) -> Self {
        self.set_calc_method(method);
        self
    }

    pub fn with_asr_method(mut self, juristic: AsrJuristic) -> Self {
        self.set_asr_method(juristic);
        self
    }

    pub fn with_high_lats_method(mut self, method: HighLatitudeMethod) -> Self {
        self.set_high_lats_method(method);
        self
    }

    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.set_time_format(format);
        self
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn asr_juristic(&self) -> AsrJuristic {
        self.asr_juristic
    }

    pub fn high_lats(&self) -> HighLatitudeMethod {
        self.high_lats
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn dhuhr_minutes(&self) -> f64 {
        self.dhuhr_minutes
    }

    pub fn offsets(&self) -> &TuningOffsets {
        &self.offsets
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn invalid_time(&self) -> &str {
        &self.invalid_time
    }

    /// Parameters of the active method
    pub fn params(&self) -> MethodParams {
        match self.method {
            CalculationMethod::Custom => self.custom,
            method => method.default_params(),
        }
    }

    /// The custom parameter record, whether or not it is active
    pub fn custom_params(&self) -> &MethodParams {
        &self.custom
    }

    pub fn set_calc_method(&mut self, method: CalculationMethod) {
        self.method = method;
    }

    pub fn set_asr_method(&mut self, juristic: AsrJuristic) {
        self.asr_juristic = juristic;
    }

    pub fn set_high_lats_method(&mut self, method: HighLatitudeMethod) {
        self.high_lats = method;
    }

    pub fn set_time_format(&mut self, format: TimeFormat) {
        self.time_format = format;
    }

    /// Set the minutes after mid-day for calculating Dhuhr
    pub fn set_dhuhr_minutes(&mut self, minutes: f64) {
        self.dhuhr_minutes = minutes;
    }

    /// Override some custom parameters and make `Custom` the active method
    ///
    /// When switching to `Custom` from another method, the untouched fields
    /// take that method's values.
    pub fn set_custom_params(&mut self, overrides: ParamOverride) {
        if self.method != CalculationMethod::Custom {
            self.custom = self.method.default_params();
        }
        self.custom.apply(&overrides);
        self.method = CalculationMethod::Custom;
    }

    /// Set the angle for calculating Fajr
    pub fn set_fajr_angle(&mut self, angle: f64) {
        self.set_custom_params(ParamOverride::fajr_angle(angle));
    }

    /// Set the angle for calculating Maghrib
    pub fn set_maghrib_angle(&mut self, angle: f64) {
        self.set_custom_params(ParamOverride::maghrib(Twilight::Angle(angle)));
    }

    /// Set the minutes after Sunset for calculating Maghrib
    pub fn set_maghrib_minutes(&mut self, minutes: f64) {
        self.set_custom_params(ParamOverride::maghrib(Twilight::Minutes(minutes)));
    }

    /// Set the angle for calculating Isha
    pub fn set_isha_angle(&mut self, angle: f64) {
        self.set_custom_params(ParamOverride::isha(Twilight::Angle(angle)));
    }

    /// Set the minutes after Maghrib for calculating Isha
    pub fn set_isha_minutes(&mut self, minutes: f64) {
        self.set_custom_params(ParamOverride::isha(Twilight::Minutes(minutes)));
    }

    /// Set the per-event tuning offsets
    pub fn tune(&mut self, offsets: TuningOffsets) {
        self.offsets = offsets;
    }

    /// Set the number of refinement passes, at least one
    pub fn set_iterations(&mut self, iterations: usize) -> Result<()> {
        if iterations == 0 {
            return Err(PrayTimeError::invalid_config("iteration count", iterations));
        }
        self.iterations = iterations;
        Ok(())
    }

    /// Set the string used for times that have no solution
    pub fn set_invalid_time(&mut self, invalid_time: impl Into<String>) {
        self.invalid_time = invalid_time.into();
    }
}
