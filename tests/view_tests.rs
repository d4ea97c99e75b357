use chrono::{Duration, NaiveDate, Weekday};
use shift_timeline::{Granularity, TimelineConfig, ViewController, ViewState, ZoomLevel};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const ALL: [Granularity; 5] = [
    Granularity::Hours,
    Granularity::HalfDayAm,
    Granularity::HalfDayPm,
    Granularity::Days,
    Granularity::Weeks,
];

#[test]
fn controller_starts_on_days_at_today() {
    let today = date(2025, 3, 14);
    let controller = ViewController::new(today);
    assert_eq!(controller.state(), ViewState::new(Granularity::Days, today));
}

#[test]
fn advance_then_retreat_restores_every_state() {
    for granularity in ALL {
        let start = ViewState::new(granularity, date(2025, 12, 31));
        let mut controller = ViewController::from_state(start);
        controller.advance_period();
        controller.retreat_period();
        assert_eq!(controller.state(), start, "{granularity}");

        controller.retreat_period();
        controller.advance_period();
        assert_eq!(controller.state(), start, "{granularity}");
    }
}

#[test]
fn period_steps_match_granularity() {
    let anchor = date(2025, 1, 6);
    let cases = [
        (Granularity::Hours, 1),
        (Granularity::Days, 7),
        (Granularity::Weeks, 28),
    ];
    for (granularity, days) in cases {
        let mut controller = ViewController::from_state(ViewState::new(granularity, anchor));
        let next = controller.advance_period();
        assert_eq!(next.granularity, granularity);
        assert_eq!(next.anchor, anchor + Duration::days(days));
        let back = controller.retreat_period();
        let back = ViewController::from_state(back).retreat_period();
        assert_eq!(back.anchor, anchor - Duration::days(days));
    }
}

#[test]
fn half_day_steps_toggle_and_move_twelve_hours() {
    let anchor = date(2025, 1, 6);
    let mut controller = ViewController::from_state(ViewState::new(Granularity::HalfDayAm, anchor));
    let start = controller.state().period_start();

    let first = controller.advance_period();
    assert_eq!(first.granularity, Granularity::HalfDayPm);
    assert_eq!(first.period_start() - start, Duration::hours(12));

    let second = controller.advance_period();
    assert_eq!(second.granularity, Granularity::HalfDayAm);
    assert_eq!(second.anchor, anchor + Duration::days(1));
    assert_eq!(second.period_start() - start, Duration::hours(24));
}

#[test]
fn retreating_from_morning_lands_on_previous_afternoon() {
    let anchor = date(2025, 1, 6);
    let mut controller = ViewController::from_state(ViewState::new(Granularity::HalfDayAm, anchor));
    let start = controller.state().period_start();
    let back = controller.retreat_period();
    assert_eq!(back, ViewState::new(Granularity::HalfDayPm, date(2025, 1, 5)));
    assert_eq!(start - back.period_start(), Duration::hours(12));
}

#[test]
fn select_granularity_resets_anchor_to_today() {
    let mut controller = ViewController::from_state(ViewState::new(Granularity::HalfDayPm, date(2020, 5, 5)));
    let today = date(2025, 3, 14);
    let state = controller.select_granularity(ZoomLevel::Weeks, today);
    assert_eq!(state, ViewState::new(Granularity::Weeks, today));
    let state = controller.select_granularity(ZoomLevel::Hours, today);
    assert_eq!(state.granularity, Granularity::Hours);
}

#[test]
fn drilling_an_hour_picks_the_half_day() {
    let config = TimelineConfig::default();
    let anchor = date(2025, 1, 6);
    let mut controller = ViewController::from_state(ViewState::new(Granularity::Hours, anchor));
    assert!(controller.drill_into("15:00", 15, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::HalfDayPm, anchor));

    let mut controller = ViewController::from_state(ViewState::new(Granularity::Hours, anchor));
    assert!(controller.drill_into("03:00", 3, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::HalfDayAm, anchor));

    let mut controller = ViewController::from_state(ViewState::new(Granularity::Hours, anchor));
    assert!(controller.drill_into("12:00", 12, &config));
    assert_eq!(controller.state().granularity, Granularity::HalfDayPm);
}

#[test]
fn drilling_a_day_opens_its_hours() {
    let config = TimelineConfig::default();
    let mut controller = ViewController::from_state(ViewState::new(Granularity::Days, date(2025, 1, 6)));
    assert!(controller.drill_into("2025-01-09", 3, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::Hours, date(2025, 1, 9)));
}

#[test]
fn drilling_a_week_opens_its_days_from_monday() {
    let config = TimelineConfig::default();
    let mut controller = ViewController::from_state(ViewState::new(Granularity::Weeks, date(2025, 1, 8)));
    assert!(controller.drill_into("2025-W03", 1, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::Days, date(2025, 1, 13)));

    let sunday_start = TimelineConfig {
        week_start: Weekday::Sun,
        ..TimelineConfig::default()
    };
    let mut controller = ViewController::from_state(ViewState::new(Granularity::Weeks, date(2025, 1, 8)));
    assert!(controller.drill_into("2025-W03", 1, &sunday_start));
    assert_eq!(controller.state(), ViewState::new(Granularity::Days, date(2025, 1, 13)));
    assert!(controller.drill_into("2025-01-12", 6, &sunday_start));
    assert_eq!(controller.state(), ViewState::new(Granularity::Hours, date(2025, 1, 12)));
}

#[test]
fn unrecognised_drill_targets_leave_state_alone() {
    let config = TimelineConfig::default();
    let start = ViewState::new(Granularity::Days, date(2025, 1, 6));
    let mut controller = ViewController::from_state(start);
    assert!(!controller.drill_into("next tuesday", 0, &config));
    assert!(!controller.drill_into("2025-W99", 0, &config));
    assert_eq!(controller.state(), start);

    let hours = ViewState::new(Granularity::Hours, date(2025, 1, 6));
    let mut controller = ViewController::from_state(hours);
    assert!(!controller.drill_into("24:00", 24, &config));
    assert_eq!(controller.state(), hours);

    let half = ViewState::new(Granularity::HalfDayAm, date(2025, 1, 6));
    let mut controller = ViewController::from_state(half);
    assert!(!controller.drill_into("08:00", 8, &config));
    assert_eq!(controller.state(), half);
}

#[test]
fn activating_cells_resolves_labels_from_the_axis() {
    let config = TimelineConfig::default();

    let mut controller = ViewController::from_state(ViewState::new(Granularity::Weeks, date(2025, 1, 8)));
    assert!(controller.activate_cell(1, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::Days, date(2025, 1, 13)));

    assert!(controller.activate_cell(2, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::Hours, date(2025, 1, 15)));

    assert!(controller.activate_cell(20, &config));
    assert_eq!(controller.state(), ViewState::new(Granularity::HalfDayPm, date(2025, 1, 15)));

    let before = controller.state();
    assert!(!controller.activate_cell(12, &config));
    assert_eq!(controller.state(), before);
}

#[test]
fn jump_keeps_zoom_level() {
    let mut controller = ViewController::from_state(ViewState::new(Granularity::Weeks, date(2025, 1, 8)));
    let state = controller.jump_to(date(2026, 2, 2));
    assert_eq!(state, ViewState::new(Granularity::Weeks, date(2026, 2, 2)));
}

#[test]
fn overflowing_the_calendar_is_a_no_op() {
    let start = ViewState::new(Granularity::Weeks, NaiveDate::MAX);
    let mut controller = ViewController::from_state(start);
    assert_eq!(controller.advance_period(), start);
}
