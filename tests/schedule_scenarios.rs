//! End-to-end schedules for known places and dates

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use praytime::format::parse_clock_time;
use praytime::trig::time_diff;
use praytime::{
    AsrJuristic, CalculationMethod, Config, Event, HighLatitudeMethod, ParamOverride, PrayTime,
    Schedule, TimeFormat, Twilight, INVALID_TIME,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn engine(method: CalculationMethod, high_lats: HighLatitudeMethod) -> PrayTime {
    PrayTime::with_config(
        Config::new()
            .with_method(method)
            .with_high_lats_method(high_lats),
    )
}

fn texts(schedule: &Schedule) -> Vec<String> {
    schedule.iter().map(|(_, value)| value.to_string()).collect()
}

#[rstest]
#[case::makkah(
    CalculationMethod::Makkah, date(2024, 3, 20), 21.4225, 39.8262, 3.0,
    ["05:08", "06:25", "12:28", "15:53", "18:32", "18:32", "20:02"]
)]
#[case::sydney_isna(
    CalculationMethod::Isna, date(2024, 3, 20), -33.8688, 151.2093, 11.0,
    ["05:50", "06:58", "13:03", "16:30", "19:06", "19:06", "20:15"]
)]
#[case::tehran(
    CalculationMethod::Tehran, date(2024, 3, 20), 35.6892, 51.3890, 3.5,
    ["04:44", "06:08", "12:12", "15:39", "18:16", "18:34", "19:22"]
)]
#[case::tehran_jafari(
    CalculationMethod::Jafari, date(2024, 3, 20), 35.6892, 51.3890, 3.5,
    ["04:53", "06:08", "12:12", "15:39", "18:16", "18:32", "19:22"]
)]
#[case::london_midsummer(
    CalculationMethod::Mwl, date(2024, 6, 21), 51.5074, -0.1278, 1.0,
    ["-----", "04:43", "13:02", "17:25", "21:22", "21:22", "-----"]
)]
fn test_known_schedules(
    #[case] method: CalculationMethod,
    #[case] day: NaiveDate,
    #[case] latitude: f64,
    #[case] longitude: f64,
    #[case] time_zone: f64,
    #[case] expected: [&str; 7],
) {
    let mut pt = engine(method, HighLatitudeMethod::None);
    let schedule = pt.compute_schedule(day, latitude, longitude, time_zone);
    assert_eq!(texts(&schedule), expected);
}

#[test]
fn test_makkah_minutes_rules() {
    let mut pt = engine(CalculationMethod::Makkah, HighLatitudeMethod::None);
    pt.set_time_format(TimeFormat::Float);
    let schedule = pt.compute_schedule(date(2024, 3, 20), 21.4225, 39.8262, 3.0);

    let sunset = schedule[Event::Sunset].as_hours().unwrap();
    let maghrib = schedule[Event::Maghrib].as_hours().unwrap();
    let isha = schedule[Event::Isha].as_hours().unwrap();
    assert_eq!(maghrib, sunset);
    assert_abs_diff_eq!(isha - maghrib, 1.5, epsilon = 1e-12);
}

#[test]
fn test_new_york_twelve_hour() {
    let mut pt = engine(CalculationMethod::Karachi, HighLatitudeMethod::None);
    pt.set_time_format(TimeFormat::Time12);
    let schedule = pt.compute_schedule(date(2024, 1, 15), 40.730610, -73.935242, -5.0);
    assert_eq!(
        texts(&schedule),
        ["05:41 am", "07:18 am", "12:05 pm", "02:33 pm", "04:53 pm", "04:53 pm", "06:29 pm"]
    );

    pt.set_asr_method(AsrJuristic::Hanafi);
    pt.set_time_format(TimeFormat::Time24);
    let schedule = pt.compute_schedule(date(2024, 1, 15), 40.730610, -73.935242, -5.0);
    assert_eq!(schedule[Event::Asr].to_string(), "15:12");
}

#[rstest]
#[case::midnight(
    HighLatitudeMethod::MidNight,
    ["00:02", "01:01", "12:02", "16:57", "23:03", "23:03", "00:02"]
)]
#[case::one_seventh(
    HighLatitudeMethod::OneSeventh,
    ["00:44", "01:01", "12:02", "16:57", "23:03", "23:03", "23:20"]
)]
#[case::angle_based(
    HighLatitudeMethod::AngleBased,
    ["00:25", "01:01", "12:02", "16:57", "23:03", "23:03", "23:36"]
)]
#[case::none(
    HighLatitudeMethod::None,
    ["-----", "01:01", "12:02", "16:57", "23:03", "23:03", "-----"]
)]
fn test_high_latitude_modes(#[case] high_lats: HighLatitudeMethod, #[case] expected: [&str; 7]) {
    let mut pt = engine(CalculationMethod::Mwl, high_lats);
    let schedule = pt.compute_schedule(date(2024, 6, 21), 65.0, 0.0, 0.0);
    assert_eq!(texts(&schedule), expected);
}

#[test]
fn test_one_seventh_clamp_is_exact() {
    let mut pt = engine(CalculationMethod::Mwl, HighLatitudeMethod::OneSeventh);
    pt.set_time_format(TimeFormat::Float);
    let schedule = pt.compute_schedule(date(2024, 6, 21), 65.0, 0.0, 0.0);
    assert!(schedule
        .iter()
        .all(|(_, value)| value.as_hours().map_or(false, |h| !h.is_nan())));

    let current = pt.current_times().unwrap();
    let night = time_diff(current[Event::Sunset], current[Event::Sunrise]);
    assert_abs_diff_eq!(
        current[Event::Fajr],
        current[Event::Sunrise] - 0.14286 * night,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        current[Event::Isha],
        current[Event::Sunset] + 0.14286 * night,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(current[Event::Fajr], 0.733361, epsilon = 1e-4);
    assert_abs_diff_eq!(current[Event::Isha], 23.329420, epsilon = 1e-4);
}

#[rstest]
#[case::midsummer(
    date(2024, 6, 21),
    ["-----", "-----", "12:02", "18:34", "-----", "-----", "-----"]
)]
#[case::midwinter(
    date(2024, 12, 21),
    ["08:03", "-----", "11:58", "-----", "-----", "-----", "15:24"]
)]
fn test_polar_sentinels(#[case] day: NaiveDate, #[case] expected: [&str; 7]) {
    let mut pt = engine(CalculationMethod::Mwl, HighLatitudeMethod::None);
    let schedule = pt.compute_schedule(day, 80.0, 0.0, 0.0);
    assert_eq!(texts(&schedule), expected);
    assert!(schedule
        .iter()
        .any(|(_, value)| value.as_text() == Some(INVALID_TIME)));
}

#[test]
fn test_custom_partial_override() {
    let mut pt = engine(CalculationMethod::Makkah, HighLatitudeMethod::None);
    pt.set_fajr_angle(15.0);

    assert_eq!(pt.config().method(), CalculationMethod::Custom);
    let params = pt.config().params();
    assert_eq!(params.fajr_angle, 15.0);
    assert_eq!(params.maghrib, Twilight::Minutes(0.0));
    assert_eq!(params.isha, Twilight::Minutes(90.0));

    // Only Fajr moves
    let schedule = pt.compute_schedule(date(2024, 3, 20), 21.4225, 39.8262, 3.0);
    assert_eq!(
        texts(&schedule),
        ["05:24", "06:25", "12:28", "15:53", "18:32", "18:32", "20:02"]
    );
}

#[test]
fn test_set_custom_params_equals_single_setters() {
    let mut a = engine(CalculationMethod::Mwl, HighLatitudeMethod::None);
    a.set_custom_params(ParamOverride {
        fajr_angle: Some(16.0),
        maghrib: None,
        isha: Some(Twilight::Minutes(75.0)),
    });

    let mut b = engine(CalculationMethod::Mwl, HighLatitudeMethod::None);
    b.set_fajr_angle(16.0);
    b.set_isha_minutes(75.0);

    assert_eq!(a.config(), b.config());
    let day = date(2024, 10, 1);
    assert_eq!(
        a.compute_schedule(day, 48.8566, 2.3522, 2.0),
        b.compute_schedule(day, 48.8566, 2.3522, 2.0)
    );
}

#[test]
fn test_random_locations_keep_event_order() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..500 {
        let latitude: f64 = rng.gen_range(-45.0..45.0);
        let longitude: f64 = rng.gen_range(-180.0..180.0);
        let day = date(
            rng.gen_range(1950..2050),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        );
        let method = CalculationMethod::ALL[rng.gen_range(0..7)];
        let mut pt = engine(method, HighLatitudeMethod::None);
        // Zone on the local meridian keeps every event inside the day
        let times = pt.compute_day_times(day, latitude, longitude, longitude / 15.0);

        let t = times.to_array();
        assert!(times.is_complete(), "{:?} {} {}", day, latitude, longitude);
        assert!(
            t[0] < t[1] && t[1] < t[2] && t[2] < t[3] && t[3] < t[4],
            "{:?} at {}, {}: {:?}",
            method,
            latitude,
            longitude,
            t
        );
        assert!(t[4] <= t[5] && t[5] <= t[6], "{:?}: {:?}", method, t);
    }
}

#[test]
fn test_deterministic_across_engines() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let latitude: f64 = rng.gen_range(-60.0..60.0);
        let longitude: f64 = rng.gen_range(-180.0..180.0);
        let time_zone = (longitude / 15.0).round();
        let day = date(2024, rng.gen_range(1..=12), rng.gen_range(1..=28));

        let mut a = engine(CalculationMethod::Egypt, HighLatitudeMethod::AngleBased);
        let mut b = a.clone();
        let first = a.compute_schedule(day, latitude, longitude, time_zone);
        assert_eq!(first, b.compute_schedule(day, latitude, longitude, time_zone));
        // Recomputing on the same engine does not depend on the last run
        assert_eq!(first, a.compute_schedule(day, latitude, longitude, time_zone));
    }
}

#[test]
fn test_formatted_times_parse_back() {
    let mut pt = engine(CalculationMethod::Makkah, HighLatitudeMethod::None);
    let day = date(2024, 3, 20);
    let exact = pt.compute_day_times(day, 21.4225, 39.8262, 3.0);
    let schedule = pt.compute_schedule(day, 21.4225, 39.8262, 3.0);

    for (event, value) in schedule.iter() {
        let parsed = parse_clock_time(value.as_text().unwrap()).unwrap();
        assert!((parsed - exact[event]).abs() <= 1.0 / 60.0, "{}", event);
    }
}

#[test]
fn test_json_output() {
    let mut pt = engine(CalculationMethod::Makkah, HighLatitudeMethod::None);
    let schedule = pt.compute_schedule(date(2024, 3, 20), 21.4225, 39.8262, 3.0);
    let json = serde_json::to_value(&schedule).unwrap();
    assert_eq!(json["Dhuhr"], "12:28");
    assert_eq!(json["Isha"], "20:02");
}

#[rstest]
#[case::jafari_midnight(
    CalculationMethod::Jafari, HighLatitudeMethod::MidNight,
    ["00:02", "01:01", "12:02", "16:57", "23:03", "00:02", "00:02"]
)]
#[case::jafari_one_seventh(
    CalculationMethod::Jafari, HighLatitudeMethod::OneSeventh,
    ["00:44", "01:01", "12:02", "16:57", "23:03", "23:20", "23:20"]
)]
#[case::jafari_angle_based(
    CalculationMethod::Jafari, HighLatitudeMethod::AngleBased,
    ["00:29", "01:01", "12:02", "16:57", "23:03", "23:11", "23:30"]
)]
#[case::tehran_angle_based(
    CalculationMethod::Tehran, HighLatitudeMethod::AngleBased,
    ["00:26", "01:01", "12:02", "16:57", "23:03", "23:12", "23:30"]
)]
fn test_angle_maghrib_is_clamped(
    #[case] method: CalculationMethod,
    #[case] high_lats: HighLatitudeMethod,
    #[case] expected: [&str; 7],
) {
    // The sun never gets 4 degrees below the horizon here in June
    let mut pt = engine(method, high_lats);
    let schedule = pt.compute_schedule(date(2024, 6, 21), 65.0, 0.0, 0.0);
    assert_eq!(texts(&schedule), expected);

    let angle = pt.config().params().maghrib.angle().unwrap();
    let current = pt.current_times().unwrap();
    let night = time_diff(current[Event::Sunset], current[Event::Sunrise]);
    let portion = high_lats.night_portion(angle).unwrap();
    assert_abs_diff_eq!(
        current[Event::Maghrib],
        current[Event::Sunset] + portion * night,
        epsilon = 1e-12
    );
}

#[test]
fn test_minutes_maghrib_uses_fallback_angle() {
    let mut plain = engine(CalculationMethod::Mwl, HighLatitudeMethod::None);
    plain.set_maghrib_minutes(60.0);
    let schedule = plain.compute_schedule(date(2024, 6, 21), 65.0, 0.0, 0.0);
    assert_eq!(schedule[Event::Maghrib].to_string(), "00:03");

    // An hour after sunset is longer than 4/60 of the night, so it is pulled in
    let mut pt = engine(CalculationMethod::Mwl, HighLatitudeMethod::AngleBased);
    pt.set_maghrib_minutes(60.0);
    let schedule = pt.compute_schedule(date(2024, 6, 21), 65.0, 0.0, 0.0);
    assert_eq!(
        texts(&schedule),
        ["00:25", "01:01", "12:02", "16:57", "23:03", "23:11", "23:36"]
    );

    let current = pt.current_times().unwrap();
    let night = time_diff(current[Event::Sunset], current[Event::Sunrise]);
    assert_abs_diff_eq!(
        current[Event::Maghrib] - current[Event::Sunset],
        4.0 / 60.0 * night,
        epsilon = 1e-12
    );
}

#[test]
fn test_polar_day_unsolved_under_correction() {
    // Without a sunrise or sunset there is no night to take portions of
    let mut pt = engine(CalculationMethod::Mwl, HighLatitudeMethod::AngleBased);
    let schedule = pt.compute_schedule(date(2024, 6, 21), 80.0, 0.0, 0.0);
    assert_eq!(
        texts(&schedule),
        ["-----", "-----", "12:02", "18:34", "-----", "-----", "-----"]
    );
}
