//! Conversion of fractional hours to clock strings and back

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::TimeFormat;
use crate::schedule::TimeValue;
use crate::trig::normalize_hour;

lazy_static! {
    static ref CLOCK_TIME: Regex =
        Regex::new(r"^\s*(\d{1,2}):(\d{2})(?:\s*([aApP])\.?[mM]\.?)?\s*$").unwrap();
}

/// Round to the nearest minute and split into (hours, minutes) on a 24h clock
fn split_minutes(time: f64) -> (u32, u32) {
    // add 0.5 minutes to round
    let time = normalize_hour(time + 0.5 / 60.0);
    let hours = time.floor();
    let minutes = ((time - hours) * 60.0).floor().min(59.0);
    (hours as u32, minutes as u32)
}

/// Convert fractional hours to "HH:MM"
///
/// Returns `None` when the time has no solution.
pub fn float_to_time24(time: f64) -> Option<String> {
    if time.is_nan() {
        return None;
    }
    let (hours, minutes) = split_minutes(time);
    Some(format!("{:02}:{:02}", hours, minutes))
}

/// Convert fractional hours to "hh:mm am" or, with `no_suffix`, "hh:mm"
pub fn float_to_time12(time: f64, no_suffix: bool) -> Option<String> {
    if time.is_nan() {
        return None;
    }
    let (hours, minutes) = split_minutes(time);
    let suffix = if hours >= 12 { "pm" } else { "am" };
    let hours = (hours + 11) % 12 + 1;
    if no_suffix {
        Some(format!("{:02}:{:02}", hours, minutes))
    } else {
        Some(format!("{:02}:{:02} {}", hours, minutes, suffix))
    }
}

/// Convert fractional hours to "hh:mm"
pub fn float_to_time12ns(time: f64) -> Option<String> {
    float_to_time12(time, true)
}

/// Render one event time in the requested format
///
/// NaN values become `invalid`, except in float format, which passes every
/// value through untouched.
pub fn format_time(time: f64, format: TimeFormat, invalid: &str) -> TimeValue {
    let text = match format {
        TimeFormat::Float => return TimeValue::Hours(time),
        TimeFormat::Time24 => float_to_time24(time),
        TimeFormat::Time12 => float_to_time12(time, false),
        TimeFormat::Time12NoSuffix => float_to_time12ns(time),
    };
    TimeValue::Text(text.unwrap_or_else(|| invalid.to_string()))
}

/// Parse "HH:MM", "hh:mm am" or "hh:mm pm" back into fractional hours
///
/// Strings without a suffix are read on a 24h clock, so the output of
/// [`float_to_time12ns`] is only recovered for morning times.
pub fn parse_clock_time(text: &str) -> Option<f64> {
    let caps = CLOCK_TIME.captures(text)?;
    let hours: u32 = caps[1].parse().ok()?;
    let minutes: u32 = caps[2].parse().ok()?;
    if minutes > 59 {
        return None;
    }

    let hours = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        None if hours < 24 => hours,
        Some(ref s) if (1..=12).contains(&hours) => {
            let base = hours % 12;
            if s == "p" {
                base + 12
            } else {
                base
            }
        }
        _ => return None,
    };

    Some(hours as f64 + minutes as f64 / 60.0)
}
