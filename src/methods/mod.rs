//! Calculation methods and their twilight parameters
//!
//! Each authority defines Fajr by a solar depression angle, and Maghrib and
//! Isha either by an angle or by a fixed delay after the preceding event.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{PrayTimeError, Result};

/// How an evening event is located
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Twilight {
    /// Solar depression below the horizon, in degrees
    Angle(f64),
    /// Minutes after the preceding event (Sunset for Maghrib, Maghrib for Isha)
    Minutes(f64),
}

impl Twilight {
    /// The depression angle, if this rule is angle-based
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Twilight::Angle(a) => Some(a),
            Twilight::Minutes(_) => None,
        }
    }

    /// The delay in minutes, if this rule is minutes-based
    pub fn minutes(&self) -> Option<f64> {
        match *self {
            Twilight::Angle(_) => None,
            Twilight::Minutes(m) => Some(m),
        }
    }
}

/// Parameters of one calculation method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodParams {
    /// Fajr depression angle in degrees
    pub fajr_angle: f64,
    pub maghrib: Twilight,
    pub isha: Twilight,
}

impl MethodParams {
    pub const fn new(fajr_angle: f64, maghrib: Twilight, isha: Twilight) -> Self {
        Self {
            fajr_angle,
            maghrib,
            isha,
        }
    }

    /// Replace the fields an override names, keep the rest
    pub fn apply(&mut self, overrides: &ParamOverride) {
        if let Some(fajr_angle) = overrides.fajr_angle {
            self.fajr_angle = fajr_angle;
        }
        if let Some(maghrib) = overrides.maghrib {
            self.maghrib = maghrib;
        }
        if let Some(isha) = overrides.isha {
            self.isha = isha;
        }
    }
}

/// A partial update of the custom method parameters
///
/// `None` leaves the corresponding field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamOverride {
    pub fajr_angle: Option<f64>,
    pub maghrib: Option<Twilight>,
    pub isha: Option<Twilight>,
}

impl ParamOverride {
    pub fn fajr_angle(angle: f64) -> Self {
        Self {
            fajr_angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn maghrib(rule: Twilight) -> Self {
        Self {
            maghrib: Some(rule),
            ..Self::default()
        }
    }

    pub fn isha(rule: Twilight) -> Self {
        Self {
            isha: Some(rule),
            ..Self::default()
        }
    }

    /// True when applying this override would change nothing
    pub fn is_empty(&self) -> bool {
        self.fajr_angle.is_none() && self.maghrib.is_none() && self.isha.is_none()
    }
}

/// Calculation methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    /// Ithna Ashari
    Jafari,
    /// University of Islamic Sciences, Karachi
    Karachi,
    /// Islamic Society of North America
    Isna,
    /// Muslim World League
    Mwl,
    /// Umm al-Qura, Makkah
    Makkah,
    /// Egyptian General Authority of Survey
    Egypt,
    /// Institute of Geophysics, University of Tehran
    Tehran,
    /// User supplied parameters
    Custom,
}

/// Built-in parameters, indexed by method id
const METHOD_PARAMS: [MethodParams; 8] = [
    MethodParams::new(16.0, Twilight::Angle(4.0), Twilight::Angle(14.0)),
    MethodParams::new(18.0, Twilight::Minutes(0.0), Twilight::Angle(18.0)),
    MethodParams::new(15.0, Twilight::Minutes(0.0), Twilight::Angle(15.0)),
    MethodParams::new(18.0, Twilight::Minutes(0.0), Twilight::Angle(17.0)),
    MethodParams::new(18.5, Twilight::Minutes(0.0), Twilight::Minutes(90.0)),
    MethodParams::new(19.5, Twilight::Minutes(0.0), Twilight::Angle(17.5)),
    MethodParams::new(17.7, Twilight::Angle(4.5), Twilight::Angle(14.0)),
    MethodParams::new(18.0, Twilight::Minutes(0.0), Twilight::Angle(17.0)),
];

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 8] = [
        CalculationMethod::Jafari,
        CalculationMethod::Karachi,
        CalculationMethod::Isna,
        CalculationMethod::Mwl,
        CalculationMethod::Makkah,
        CalculationMethod::Egypt,
        CalculationMethod::Tehran,
        CalculationMethod::Custom,
    ];

    /// Numeric id of the method, stable across releases
    pub fn id(&self) -> i32 {
        *self as i32
    }

    /// Short name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            CalculationMethod::Jafari => "jafari",
            CalculationMethod::Karachi => "karachi",
            CalculationMethod::Isna => "isna",
            CalculationMethod::Mwl => "mwl",
            CalculationMethod::Makkah => "makkah",
            CalculationMethod::Egypt => "egypt",
            CalculationMethod::Tehran => "tehran",
            CalculationMethod::Custom => "custom",
        }
    }

    /// Full name of the issuing authority
    pub fn description(&self) -> &'static str {
        match self {
            CalculationMethod::Jafari => "Ithna Ashari",
            CalculationMethod::Karachi => "University of Islamic Sciences, Karachi",
            CalculationMethod::Isna => "Islamic Society of North America",
            CalculationMethod::Mwl => "Muslim World League",
            CalculationMethod::Makkah => "Umm al-Qura, Makkah",
            CalculationMethod::Egypt => "Egyptian General Authority of Survey",
            CalculationMethod::Tehran => "Institute of Geophysics, University of Tehran",
            CalculationMethod::Custom => "Custom setting",
        }
    }

    /// Built-in parameters of this method
    ///
    /// For `Custom` these are only the initial values; the live custom record
    /// is owned by [`crate::Config`].
    pub fn default_params(&self) -> MethodParams {
        METHOD_PARAMS[*self as usize]
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for CalculationMethod {
    type Error = PrayTimeError;

    fn try_from(value: i32) -> Result<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|i| CalculationMethod::ALL.get(i).copied())
            .ok_or_else(|| PrayTimeError::invalid_config("calculation method", value))
    }
}

/// Alternative names for the built-in methods
const METHOD_ALIASES: [(&str, CalculationMethod); 9] = [
    ("ithna ashari", CalculationMethod::Jafari),
    ("shia", CalculationMethod::Jafari),
    ("muslim world league", CalculationMethod::Mwl),
    ("umm al-qura", CalculationMethod::Makkah),
    ("ummalqura", CalculationMethod::Makkah),
    ("umm al qura", CalculationMethod::Makkah),
    ("egyptian", CalculationMethod::Egypt),
    ("north america", CalculationMethod::Isna),
    ("university of islamic sciences", CalculationMethod::Karachi),
];

lazy_static! {
    /// Map from lowercase method names and aliases to methods
    static ref METHOD_IDS: HashMap<String, CalculationMethod> = {
        let mut m = HashMap::new();
        for method in CalculationMethod::ALL.iter() {
            m.insert(method.name().to_string(), *method);
        }
        for &(alias, method) in METHOD_ALIASES.iter() {
            m.insert(alias.to_string(), method);
        }
        m
    };
}

impl FromStr for CalculationMethod {
    type Err = PrayTimeError;

    fn from_str(s: &str) -> Result<Self> {
        METHOD_IDS
            .get(&s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| PrayTimeError::invalid_config("calculation method", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let makkah = CalculationMethod::Makkah.default_params();
        assert_eq!(makkah.fajr_angle, 18.5);
        assert_eq!(makkah.maghrib, Twilight::Minutes(0.0));
        assert_eq!(makkah.isha, Twilight::Minutes(90.0));

        let tehran = CalculationMethod::Tehran.default_params();
        assert_eq!(tehran.maghrib.angle(), Some(4.5));
        assert_eq!(tehran.isha.angle(), Some(14.0));

        let egypt = CalculationMethod::Egypt.default_params();
        assert_eq!(egypt.fajr_angle, 19.5);
        assert_eq!(egypt.isha.minutes(), None);
    }

    #[test]
    fn test_ids_round_trip() {
        for method in CalculationMethod::ALL {
            assert_eq!(CalculationMethod::try_from(method.id()), Ok(method));
        }
        assert_eq!(CalculationMethod::Custom.id(), 7);
    }

    #[test]
    fn test_invalid_id() {
        assert!(CalculationMethod::try_from(8).is_err());
        assert!(CalculationMethod::try_from(-1).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("MWL".parse::<CalculationMethod>(), Ok(CalculationMethod::Mwl));
        assert_eq!(
            " Umm al-Qura ".parse::<CalculationMethod>(),
            Ok(CalculationMethod::Makkah)
        );
        assert_eq!("isna".parse::<CalculationMethod>(), Ok(CalculationMethod::Isna));
        assert!("gregorian".parse::<CalculationMethod>().is_err());
    }

    #[test]
    fn test_apply_partial_override() {
        let mut params = CalculationMethod::Mwl.default_params();
        params.apply(&ParamOverride::fajr_angle(15.0));
        assert_eq!(params.fajr_angle, 15.0);
        assert_eq!(params.maghrib, Twilight::Minutes(0.0));
        assert_eq!(params.isha, Twilight::Angle(17.0));

        params.apply(&ParamOverride::isha(Twilight::Minutes(75.0)));
        assert_eq!(params.fajr_angle, 15.0);
        assert_eq!(params.isha, Twilight::Minutes(75.0));

        // Negative angles are legitimate values, not "no change" markers
        params.apply(&ParamOverride::maghrib(Twilight::Angle(-1.0)));
        assert_eq!(params.maghrib, Twilight::Angle(-1.0));
    }

    #[test]
    fn test_empty_override() {
        let mut params = CalculationMethod::Karachi.default_params();
        let before = params;
        assert!(ParamOverride::default().is_empty());
        params.apply(&ParamOverride::default());
        assert_eq!(params, before);
    }
}
