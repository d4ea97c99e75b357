//! Time-to-position arithmetic for timeline bars.
//!
//! Every function here is pure. Positions are percentages of a track: a 24-hour day for
//! shifts, the shift's own span for breaks, and a 28-day window for week columns.

use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, HOURS_PER_DAY, Interval};

pub const WEEK_WINDOW_DAYS: u32 = 28;
pub const WEEK_AXIS_CELLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPosition {
    pub left_pct: f64,
    pub width_pct: f64,
}

pub fn to_decimal_hour(text: &str) -> ClockTime {
    ClockTime::parse_lenient(text)
}

pub fn effective_end(interval: &Interval) -> f64 {
    if interval.end >= interval.start {
        interval.end.hours()
    } else {
        interval.end.hours() + HOURS_PER_DAY
    }
}

/// Position of a shift on a 24-hour day track. Midnight-crossing shifts overflow past 100%.
pub fn position_of(shift: &Interval) -> BarPosition {
    let start = shift.start.hours();
    BarPosition {
        left_pct: non_negative(start / HOURS_PER_DAY * 100.0),
        width_pct: non_negative((effective_end(shift) - start) / HOURS_PER_DAY * 100.0),
    }
}

/// Position of a break relative to its shift's span, or `None` when the break leaves it.
pub fn position_of_break_within(shift: &Interval, brk: &Interval) -> Option<BarPosition> {
    let shift_start = shift.start.hours();
    let shift_end = effective_end(shift);
    let break_start = brk.start.hours();
    let break_end = effective_end(brk);

    if break_start < shift_start || break_end > shift_end {
        return None;
    }

    let span = shift_end - shift_start;
    if span <= 0.0 {
        return Some(BarPosition {
            left_pct: 0.0,
            width_pct: 0.0,
        });
    }

    Some(BarPosition {
        left_pct: non_negative((break_start - shift_start) / span * 100.0),
        width_pct: non_negative((break_end - break_start) / span * 100.0),
    })
}

/// Projects `[start, end)` hours onto a window, clipping at the edges.
///
/// Returns `None` when the span and the window do not overlap.
pub fn position_in_window(start: f64, end: f64, window_start: f64, window_end: f64) -> Option<BarPosition> {
    let window = window_end - window_start;
    if window <= 0.0 {
        return None;
    }
    let visible_start = start.max(window_start);
    let visible_end = end.min(window_end);
    if visible_end <= visible_start {
        return None;
    }
    Some(BarPosition {
        left_pct: non_negative((visible_start - window_start) / window * 100.0),
        width_pct: non_negative((visible_end - visible_start) / window * 100.0),
    })
}

/// Share of the 28-day window taken by a column of the week axis.
///
/// `anchor_weekday_offset` is the number of days elapsed since the start of the anchor's
/// week (0..=6). Column 0 holds the rest of that week, columns 1..=3 are full weeks and
/// column 4 holds the leftover days.
pub fn week_width_pct(cell_index: usize, anchor_weekday_offset: u32) -> f64 {
    let offset = anchor_weekday_offset.min(6);
    let days = match cell_index {
        0 => 7 - offset,
        1..=3 => 7,
        4 => offset,
        _ => 0,
    };
    f64::from(days) / f64::from(WEEK_WINDOW_DAYS) * 100.0
}

/// Day index (from the anchor) at which week column `cell_index` begins.
pub fn week_cell_start_day(cell_index: usize, anchor_weekday_offset: u32) -> u32 {
    let offset = anchor_weekday_offset.min(6);
    match cell_index {
        0 => 0,
        i => (7 - offset) + 7 * (i.min(WEEK_AXIS_CELLS - 1) as u32 - 1),
    }
}

/// Week column that owns the day `day_index` days after the anchor.
pub fn week_cell_for_day(day_index: u32, anchor_weekday_offset: u32) -> usize {
    let first_week_days = 7 - anchor_weekday_offset.min(6);
    if day_index < first_week_days {
        0
    } else {
        (1 + ((day_index - first_week_days) / 7) as usize).min(WEEK_AXIS_CELLS - 1)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_widths_always_fill_the_window() {
        for offset in 0..7 {
            let total: f64 = (0..WEEK_AXIS_CELLS).map(|i| week_width_pct(i, offset)).sum();
            assert!((total - 100.0).abs() < 1e-9, "offset {offset} sums to {total}");
        }
    }

    #[test]
    fn week_cells_partition_the_window() {
        for offset in 0..7 {
            for cell in 1..WEEK_AXIS_CELLS {
                let start = week_cell_start_day(cell, offset);
                assert_eq!(week_cell_for_day(start, offset), cell.min(WEEK_AXIS_CELLS - 1));
            }
        }
    }
}
