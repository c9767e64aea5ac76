//! Compare the built-in calculation methods at one location
//!
//! Shows how far each method's Fajr and Isha drift from the Muslim World
//! League values, and what the higher latitude rules do in midsummer.
//!
//! Run with `cargo run --example method_comparison`.

use chrono::NaiveDate;

use praytime::format::float_to_time24;
use praytime::{CalculationMethod, Config, Event, HighLatitudeMethod, PrayTime, INVALID_TIME};

fn clock(time: f64) -> String {
    float_to_time24(time).unwrap_or_else(|| INVALID_TIME.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let date = NaiveDate::from_ymd_opt(2024, 3, 20).ok_or("invalid date")?;
    let (latitude, longitude, time_zone) = (33.6844, 73.0479, 5.0);

    let mut reference = PrayTime::with_config(Config::new().with_method(CalculationMethod::Mwl));
    let mwl = reference.compute_day_times(date, latitude, longitude, time_zone);

    println!("Islamabad, {}", date);
    println!(
        "{:<10} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "Method", "Fajr", "Maghrib", "Isha", "dFajr(m)", "dIsha(m)"
    );
    println!("---------------------------------------------------------");
    for method in CalculationMethod::ALL
        .iter()
        .filter(|m| **m != CalculationMethod::Custom)
    {
        let mut pt = PrayTime::with_config(Config::new().with_method(*method));
        let times = pt.compute_day_times(date, latitude, longitude, time_zone);
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>+10.1} {:>+10.1}",
            method.name(),
            clock(times[Event::Fajr]),
            clock(times[Event::Maghrib]),
            clock(times[Event::Isha]),
            (times[Event::Fajr] - mwl[Event::Fajr]) * 60.0,
            (times[Event::Isha] - mwl[Event::Isha]) * 60.0,
        );
    }

    let summer = NaiveDate::from_ymd_opt(2024, 6, 21).ok_or("invalid date")?;
    let (latitude, longitude, time_zone) = (59.3293, 18.0686, 2.0);
    println!("\nStockholm, {} (MWL)", summer);
    println!("{:<12} {:>8} {:>8}", "Adjustment", "Fajr", "Isha");
    println!("-----------------------------");
    for high_lats in [
        HighLatitudeMethod::None,
        HighLatitudeMethod::MidNight,
        HighLatitudeMethod::OneSeventh,
        HighLatitudeMethod::AngleBased,
    ] {
        let config = Config::new()
            .with_method(CalculationMethod::Mwl)
            .with_high_lats_method(high_lats);
        let mut pt = PrayTime::with_config(config);
        let times = pt.compute_day_times(summer, latitude, longitude, time_zone);
        println!(
            "{:<12} {:>8} {:>8}",
            format!("{:?}", high_lats),
            clock(times[Event::Fajr]),
            clock(times[Event::Isha])
        );
    }

    Ok(())
}
