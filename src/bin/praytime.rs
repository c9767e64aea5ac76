//! Prayer Times Tool
//!
//! Prints the seven daily prayer times for a date and location.
//!
//! Usage:
//!   cargo run --bin praytime -- --lat 21.4225 --lon 39.8262 --tz 3 --method makkah

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser};
use log::info;
use serde::Serialize;

use praytime::calendar::format_date;
use praytime::{
    AsrJuristic, CalculationMethod, Config, HighLatitudeMethod, PrayTime, Schedule, TimeFormat,
    TuningOffsets,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Prayer Times Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes daily prayer times from the position of the sun",
    long_about = None
)]
struct Args {
    /// Date as YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Latitude in degrees, north positive
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in degrees, east positive
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,

    /// Offset from UTC in hours
    #[arg(long, allow_negative_numbers = true)]
    tz: f64,

    /// Calculation method (jafari, karachi, isna, mwl, makkah, egypt, tehran)
    #[arg(long, default_value = "jafari")]
    method: CalculationMethod,

    /// Juristic method for Asr (shafii, hanafi)
    #[arg(long, default_value = "shafii")]
    asr: AsrJuristic,

    /// Higher latitude adjustment (none, midnight, oneseventh, anglebased)
    #[arg(long, default_value = "none")]
    high_lats: HighLatitudeMethod,

    /// Output format (24h, 12h, 12hns, float)
    #[arg(long, default_value = "24h")]
    format: TimeFormat,

    /// Minutes after mid-day for Dhuhr
    #[arg(long, default_value_t = 0.0)]
    dhuhr_minutes: f64,

    /// Fajr depression angle, switches to a custom method
    #[arg(long)]
    fajr_angle: Option<f64>,

    /// Isha depression angle, switches to a custom method
    #[arg(long, conflicts_with = "isha_minutes")]
    isha_angle: Option<f64>,

    /// Minutes after Maghrib for Isha, switches to a custom method
    #[arg(long)]
    isha_minutes: Option<f64>,

    /// Maghrib depression angle, switches to a custom method
    #[arg(long, conflicts_with = "maghrib_minutes")]
    maghrib_angle: Option<f64>,

    /// Minutes after Sunset for Maghrib, switches to a custom method
    #[arg(long)]
    maghrib_minutes: Option<f64>,

    /// Per-event offsets in minutes, e.g. fajr=2,isha=-1
    #[arg(long, allow_hyphen_values = true)]
    tune: Option<TuningOffsets>,

    /// Number of refinement passes
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Print the schedule as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// JSON output
#[derive(Serialize)]
struct Report<'a> {
    date: String,
    latitude: f64,
    longitude: f64,
    time_zone: f64,
    method: CalculationMethod,
    times: &'a Schedule,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Build the engine configuration from the command line
fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::new()
        .with_method(args.method)
        .with_asr_method(args.asr)
        .with_high_lats_method(args.high_lats)
        .with_time_format(args.format);
    config.set_dhuhr_minutes(args.dhuhr_minutes);
    config.set_iterations(args.iterations)?;

    if let Some(angle) = args.fajr_angle {
        config.set_fajr_angle(angle);
    }
    if let Some(angle) = args.maghrib_angle {
        config.set_maghrib_angle(angle);
    }
    if let Some(minutes) = args.maghrib_minutes {
        config.set_maghrib_minutes(minutes);
    }
    if let Some(angle) = args.isha_angle {
        config.set_isha_angle(angle);
    }
    if let Some(minutes) = args.isha_minutes {
        config.set_isha_minutes(minutes);
    }
    if let Some(offsets) = args.tune {
        config.tune(offsets);
    }
    Ok(config)
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-----------------------------");
}

fn display_schedule(date: NaiveDate, args: &Args, config: &Config, schedule: &Schedule) {
    print_section_header(&format!("Prayer times for {}", format_date(date)));
    println!(
        "Location: {:.4}, {:.4} (UTC{:+})",
        args.lat, args.lon, args.tz
    );
    println!("Method:   {}", config.method().description());
    println!("-----------------------------");
    for (event, value) in schedule.iter() {
        println!("{:<10} {}", event.name(), value);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let config = build_config(&args)?;
    info!(
        "Using method {} with {:?} high latitude adjustment",
        config.method(),
        config.high_lats()
    );

    let mut pt = PrayTime::with_config(config);
    let schedule = pt.compute_schedule(date, args.lat, args.lon, args.tz);

    if args.json {
        let report = Report {
            date: format_date(date),
            latitude: args.lat,
            longitude: args.lon,
            time_zone: args.tz,
            method: pt.config().method(),
            times: &schedule,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_schedule(date, &args, pt.config(), &schedule);
    }

    Ok(())
}
