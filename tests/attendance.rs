//! Tests marking days through a session and the resulting office quota.

use office_quota::config::Config;
use office_quota::time::holiday::Turkey;
use office_quota::time::HolidayClassifier;
use office_quota::StatusCode;

use pretty_assertions::assert_eq;

mod common;

use common::{month, Workspace};

/// Toggles the day until it has the wanted status.
fn mark(session: &mut office_quota::Session, day: usize, status: StatusCode) {
    while session.status_of(day) != status {
        session.toggle_status(day).expect("day should be valid");
    }
}

#[test]
fn test_march_2024_quota() {
    let workspace = Workspace::new();
    let mut session = workspace.open(month(2024, 3));

    // a week of leave, 2024-03-04 is a monday
    for day in 4..=8 {
        mark(&mut session, day, StatusCode::Leave);
    }
    for day in [1, 11, 12, 13, 14, 15, 18, 19] {
        mark(&mut session, day, StatusCode::Office);
    }
    mark(&mut session, 20, StatusCode::Home);

    let stats = session.calculate_stats();
    assert_eq!(stats.summary(), (21, 16, 8, 8));
    assert!(stats.quota_met);

    // one office day less and the quota is missed
    mark(&mut session, 19, StatusCode::Home);
    let stats = session.calculate_stats();
    assert_eq!(stats.summary(), (21, 16, 7, 8));
    assert!(!stats.quota_met);
    assert_eq!(stats.missing_office_days(), 1);
}

#[test]
fn test_whole_month_on_leave() {
    let workspace = Workspace::new();
    let mut session = workspace.open(month(2024, 3));

    let classifier = HolidayClassifier::weekends_only();
    for date in month(2024, 3).days().filter(|date| classifier.is_workday(*date)) {
        mark(&mut session, date.day(), StatusCode::Leave);
    }

    let stats = session.calculate_stats();
    assert_eq!(stats.summary(), (21, 0, 0, 0));
    assert!(stats.quota_met);
}

#[test]
fn test_navigation_keeps_months_apart() {
    let workspace = Workspace::new();
    let mut session = workspace.open(month(2024, 12));

    mark(&mut session, 2, StatusCode::Office);
    assert_eq!(session.change_month(1).unwrap(), month(2025, 1));
    assert_eq!(session.status_of(2), StatusCode::Empty);

    mark(&mut session, 2, StatusCode::Home);
    assert_eq!(session.change_month(-1).unwrap(), month(2024, 12));
    assert_eq!(session.status_of(2), StatusCode::Office);

    assert_eq!(session.change_month(13).unwrap(), month(2026, 1));
    assert_eq!(session.change_month(-25).unwrap(), month(2023, 12));

    let store = workspace.document().load().unwrap();
    let months = store.months().map(|(key, _)| key).collect::<Vec<_>>();
    assert_eq!(
        months,
        vec![month(2023, 12), month(2024, 12), month(2025, 1), month(2026, 1)]
    );
}

#[test]
fn test_reopening_continues_where_it_left_off() {
    let workspace = Workspace::new();

    {
        let mut session = workspace.open(month(2024, 5));
        mark(&mut session, 6, StatusCode::Office);
        mark(&mut session, 7, StatusCode::Leave);
    }

    let session = workspace.open(month(2024, 5));
    assert_eq!(session.status_of(6), StatusCode::Office);
    assert_eq!(session.status_of(7), StatusCode::Leave);
}

#[test]
fn test_turkish_holidays_reduce_workdays() {
    let workspace = Workspace::new();
    let session = workspace.open_with(HolidayClassifier::with_source(Turkey), month(2024, 5));

    // 23 weekdays in may 2024, labour day and youth day (a sunday) are holidays
    assert_eq!(session.calculate_stats().total_workdays, 22);

    let without_holidays = workspace.open(month(2024, 5));
    assert_eq!(without_holidays.calculate_stats().total_workdays, 23);
}

#[test]
fn test_configured_days_off() {
    let workspace = Workspace::new();
    let mut builder = Config::try_from_toml(concat!(
        "[holidays]\n",
        "region = \"TR\"\n",
        "extra = [\"2024-04-09\"]\n",
    ))
    .expect("toml should be valid");
    builder.data_file(workspace.data_file());
    let config = builder.build();

    let mut session =
        workspace.open_with(config.holidays().classifier(), month(2024, 4));
    assert_eq!(config.document(), workspace.document());

    // office marks on holidays do not count
    mark(&mut session, 10, StatusCode::Office);
    mark(&mut session, 15, StatusCode::Office);

    let stats = session.calculate_stats();
    // 22 weekdays, the eve and 3 days of ramadan feast and national sovereignty day
    assert_eq!(stats.total_workdays, 17);
    assert_eq!(stats.office_days, 1);
    assert_eq!(stats.required_minimum, 9);
}

#[test]
fn test_colors_are_persisted() {
    let workspace = Workspace::new();

    {
        let mut session = workspace.open(month(2024, 3));
        session
            .choose_color_for(StatusCode::Leave, Some("#010101".parse().unwrap()))
            .unwrap();
        // cancelled selection
        session.choose_color_for(StatusCode::Home, None).unwrap();
    }

    let session = workspace.open(month(2024, 3));
    assert_eq!(session.get_color_for("I").as_str(), "#010101");
    assert_eq!(session.get_color_for("E").as_str(), "#ffd54f");
    assert_eq!(session.get_color_for("nope").as_str(), "#ffffff");
}
