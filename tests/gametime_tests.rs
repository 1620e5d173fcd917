use chrono::{TimeZone, Utc};

use hoops_watch_lambda_rust::error::WatchError;
use hoops_watch_lambda_rust::gametime::{parse_game_time, year_for};
use hoops_watch_lambda_rust::model::WatchTarget;

#[test]
fn parses_summer_morning_in_pacific_daylight_time() {
    let dt = parse_game_time("Sat, June 21 10:00am", 2025).expect("parse");
    assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 21, 17, 0, 0).unwrap());
}

#[test]
fn parses_winter_evening_in_pacific_standard_time() {
    let dt = parse_game_time("Fri, January 9 7:30pm", 2026).expect("parse");
    // 19:30 PST is 03:30 UTC the next day
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 10, 3, 30, 0).unwrap());
}

#[test]
fn tolerates_surrounding_whitespace_and_uppercase_meridiem() {
    let dt = parse_game_time("  Sat,   June 21   10:00AM \n", 2025).expect("parse");
    assert_eq!(dt, Utc.with_ymd_and_hms(2025, 6, 21, 17, 0, 0).unwrap());
}

#[test]
fn weekday_is_not_checked_against_the_supplied_year() {
    // June 21 2026 is a Sunday
    let dt = parse_game_time("Sat, June 21 10:00am", 2026).expect("parse");
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 6, 21, 17, 0, 0).unwrap());
}

#[test]
fn rejects_garbage() {
    for input in ["", "TBD", "Sat, June 21", "Sat, Junetember 21 10:00am", "Sat, June 21 13:00pm"] {
        let err = parse_game_time(input, 2025).unwrap_err();
        assert!(matches!(err, WatchError::TimeParse { .. }), "input {:?} gave {}", input, err);
    }
}

#[test]
fn year_comes_from_target_when_set() {
    let dated = WatchTarget::new("G", "T", "L").with_date_time(Utc.with_ymd_and_hms(2024, 6, 22, 17, 0, 0).unwrap());
    assert_eq!(year_for(&dated, 2025), 2024);

    let undated = WatchTarget::new("G", "T", "L");
    assert_eq!(year_for(&undated, 2025), 2025);
}

#[test]
fn year_is_taken_in_pacific_time() {
    // 2025-01-01 05:00 UTC is still New Year's Eve 2024 in Seattle
    let target = WatchTarget::new("G", "T", "L").with_date_time(Utc.with_ymd_and_hms(2025, 1, 1, 5, 0, 0).unwrap());
    assert_eq!(year_for(&target, 2030), 2024);
}
