use approx::assert_abs_diff_eq;
use shift_timeline::clock::{ClockTime, Interval};
use shift_timeline::geometry::{
    effective_end, position_in_window, position_of, position_of_break_within, to_decimal_hour,
    week_width_pct,
};

#[test]
fn decimal_hour_stays_within_a_day_for_valid_times() {
    for hour in 0..24 {
        for minute in (0..60).step_by(7) {
            for second in [0, 30, 59] {
                let text = format!("{hour:02}:{minute:02}:{second:02}");
                let value = to_decimal_hour(&text).hours();
                assert!((0.0..24.0).contains(&value), "{text} -> {value}");
            }
        }
    }
}

#[test]
fn decimal_hour_reads_fractional_seconds() {
    assert_abs_diff_eq!(to_decimal_hour("12:30").hours(), 12.5);
    assert_abs_diff_eq!(to_decimal_hour("06:15:00.000").hours(), 6.25);
    assert_abs_diff_eq!(to_decimal_hour("00:00:36.5").hours(), 36.5 / 3600.0, epsilon = 1e-12);
}

#[test]
fn text_without_colon_degrades_to_midnight() {
    assert_eq!(to_decimal_hour("0800"), ClockTime::MIDNIGHT);
    assert_eq!(to_decimal_hour("eight"), ClockTime::MIDNIGHT);
}

#[test]
fn midnight_crossing_shift_extends_past_24() {
    let night = Interval::from_hours(22.0, 6.0);
    assert_abs_diff_eq!(effective_end(&night), 30.0);

    let pos = position_of(&night);
    assert_abs_diff_eq!(pos.left_pct, 91.67, epsilon = 0.01);
    assert_abs_diff_eq!(pos.width_pct, 33.33, epsilon = 0.01);
}

#[test]
fn same_day_shift_keeps_its_end() {
    let day = Interval::from_hours(8.0, 16.0);
    assert_abs_diff_eq!(effective_end(&day), 16.0);
    let pos = position_of(&day);
    assert_abs_diff_eq!(pos.left_pct, 33.33, epsilon = 0.01);
    assert_abs_diff_eq!(pos.width_pct, 33.33, epsilon = 0.01);
}

#[test]
fn break_across_midnight_is_placed_inside_night_shift() {
    let night = Interval::from_hours(22.0, 6.0);
    let late_break = Interval::from_hours(23.0, 1.0);

    let pos = position_of_break_within(&night, &late_break).expect("break inside shift");
    assert_abs_diff_eq!(pos.left_pct, 12.5);
    assert_abs_diff_eq!(pos.width_pct, 25.0);
}

#[test]
fn early_morning_break_in_night_shift_is_excluded() {
    let night = Interval::from_hours(22.0, 6.0);
    let early = Interval::from_hours(5.0, 7.0);
    assert!(position_of_break_within(&night, &early).is_none());
}

#[test]
fn break_overhanging_shift_end_is_excluded() {
    let day = Interval::from_hours(8.0, 16.0);
    assert!(position_of_break_within(&day, &Interval::from_hours(15.5, 16.5)).is_none());
    assert!(position_of_break_within(&day, &Interval::from_hours(7.5, 8.5)).is_none());
    assert!(position_of_break_within(&day, &Interval::from_hours(8.0, 16.0)).is_some());
}

#[test]
fn zero_length_shift_has_zero_width() {
    let empty = Interval::from_hours(9.0, 9.0);
    assert_abs_diff_eq!(position_of(&empty).width_pct, 0.0);
    let pos = position_of_break_within(&empty, &empty).expect("degenerate break");
    assert_abs_diff_eq!(pos.width_pct, 0.0);
}

#[test]
fn window_projection_clips_and_skips_disjoint_spans() {
    let pos = position_in_window(8.0, 16.0, 0.0, 12.0).expect("overlap");
    assert_abs_diff_eq!(pos.left_pct, 66.67, epsilon = 0.01);
    assert_abs_diff_eq!(pos.width_pct, 33.33, epsilon = 0.01);

    assert!(position_in_window(22.0, 30.0, 0.0, 12.0).is_none());
    assert!(position_in_window(12.0, 12.0, 0.0, 24.0).is_none());
}

#[test]
fn week_widths_follow_the_partial_first_week() {
    // Anchor on the first day of the week: four full weeks and an empty tail.
    assert_abs_diff_eq!(week_width_pct(0, 0), 25.0);
    assert_abs_diff_eq!(week_width_pct(4, 0), 0.0);

    // Anchor three days in: four days left, three days spill into the last column.
    assert_abs_diff_eq!(week_width_pct(0, 3), 4.0 / 28.0 * 100.0);
    assert_abs_diff_eq!(week_width_pct(2, 3), 25.0);
    assert_abs_diff_eq!(week_width_pct(4, 3), 3.0 / 28.0 * 100.0);

    assert_abs_diff_eq!(week_width_pct(7, 3), 0.0);
}
