//! Print a week of prayer times for a handful of cities
//!
//! Run with `cargo run --example daily_schedule`.

use chrono::{Duration, NaiveDate};

use praytime::{CalculationMethod, Config, Event, HighLatitudeMethod, PrayTime, TimeFormat};

struct City {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    time_zone: f64,
    method: CalculationMethod,
}

const CITIES: [City; 4] = [
    City {
        name: "Makkah",
        latitude: 21.4225,
        longitude: 39.8262,
        time_zone: 3.0,
        method: CalculationMethod::Makkah,
    },
    City {
        name: "Cairo",
        latitude: 30.0444,
        longitude: 31.2357,
        time_zone: 2.0,
        method: CalculationMethod::Egypt,
    },
    City {
        name: "London",
        latitude: 51.5074,
        longitude: -0.1278,
        time_zone: 1.0,
        method: CalculationMethod::Mwl,
    },
    City {
        name: "Toronto",
        latitude: 43.6532,
        longitude: -79.3832,
        time_zone: -4.0,
        method: CalculationMethod::Isna,
    },
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 6, 17).ok_or("invalid start date")?;

    for city in CITIES.iter() {
        let config = Config::new()
            .with_method(city.method)
            .with_high_lats_method(HighLatitudeMethod::AngleBased)
            .with_time_format(TimeFormat::Time12);
        let mut pt = PrayTime::with_config(config);

        println!("\n{} ({}):", city.name, city.method.description());
        print!("{:<12}", "Date");
        for event in Event::ALL {
            print!("{:>10}", event.name());
        }
        println!();

        for offset in 0..7 {
            let date = start + Duration::days(offset);
            let schedule = pt.compute_schedule(date, city.latitude, city.longitude, city.time_zone);
            print!("{:<12}", date.to_string());
            for (_, value) in schedule.iter() {
                print!("{:>10}", value.to_string());
            }
            println!();
        }
    }

    Ok(())
}
