//! Prayer events and the schedules built from them

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::constants::TIME_NAMES;
use crate::{PrayTimeError, Result};

/// The seven daily events, in schedule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Event {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
}

impl Event {
    pub const ALL: [Event; 7] = [
        Event::Fajr,
        Event::Sunrise,
        Event::Dhuhr,
        Event::Asr,
        Event::Sunset,
        Event::Maghrib,
        Event::Isha,
    ];

    /// Position of the event in a schedule
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Display label of the event
    pub fn name(&self) -> &'static str {
        TIME_NAMES[self.index()]
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Event {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Event::ALL
            .iter()
            .find(|event| event.name().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| PrayTimeError::ParseError(format!("unknown event '{}'", wanted)))
    }
}

/// One value per event, in fractional hours or fractions of a day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTimes(pub [f64; 7]);

impl DayTimes {
    pub fn new(times: [f64; 7]) -> Self {
        Self(times)
    }

    /// Apply `f` to every element
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }

    /// Iterate over (event, value) pairs in schedule order
    pub fn iter(&self) -> impl Iterator<Item = (Event, f64)> + '_ {
        Event::ALL.iter().map(move |&event| (event, self[event]))
    }

    /// Whether every event has a solution
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|t| !t.is_nan())
    }

    pub fn to_array(&self) -> [f64; 7] {
        self.0
    }
}

impl Index<Event> for DayTimes {
    type Output = f64;

    fn index(&self, event: Event) -> &f64 {
        &self.0[event.index()]
    }
}

impl IndexMut<Event> for DayTimes {
    fn index_mut(&mut self, event: Event) -> &mut f64 {
        &mut self.0[event.index()]
    }
}

/// A single formatted entry of a schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// A formatted clock time, or the invalid-time string
    Text(String),
    /// Raw fractional hours, produced by [`crate::TimeFormat::Float`]
    Hours(f64),
}

impl TimeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TimeValue::Text(s) => Some(s),
            TimeValue::Hours(_) => None,
        }
    }

    pub fn as_hours(&self) -> Option<f64> {
        match *self {
            TimeValue::Text(_) => None,
            TimeValue::Hours(h) => Some(h),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Text(s) => f.write_str(s),
            TimeValue::Hours(h) => write!(f, "{}", h),
        }
    }
}

/// The formatted times of one day, in schedule order
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    times: [TimeValue; 7],
}

impl Schedule {
    pub fn new(times: [TimeValue; 7]) -> Self {
        Self { times }
    }

    pub fn get(&self, event: Event) -> &TimeValue {
        &self.times[event.index()]
    }

    /// Iterate over (event, value) pairs in schedule order
    pub fn iter(&self) -> impl Iterator<Item = (Event, &TimeValue)> + '_ {
        Event::ALL.iter().copied().zip(self.times.iter())
    }

    /// The raw values, without labels
    pub fn times(&self) -> &[TimeValue; 7] {
        &self.times
    }

    pub fn into_times(self) -> [TimeValue; 7] {
        self.times
    }
}

impl Index<Event> for Schedule {
    type Output = TimeValue;

    fn index(&self, event: Event) -> &TimeValue {
        self.get(event)
    }
}

/// Serialize as an ordered map from event name to value
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.times.len()))?;
        for (event, value) in self.iter() {
            map.serialize_entry(event.name(), value)?;
        }
        map.end()
    }
}
