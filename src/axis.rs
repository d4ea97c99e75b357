//! Header cells of the timeline for a given granularity and anchor.
//!
//! A [`TimeAxis`] is a cheap value; iterating it recomputes every cell from the view state,
//! so a new axis is built whenever the view changes and an existing one can be walked as
//! many times as needed.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::config::TimelineConfig;
use crate::geometry::{WEEK_AXIS_CELLS, week_cell_start_day, week_width_pct};
use crate::view::{Granularity, ViewState};

const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// What a header cell stands for. Drill transitions are resolved from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AxisKey {
    Hour { hour: u32 },
    Day { date: NaiveDate },
    Week { year: i32, week: u32 },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisCell {
    pub label: String,
    pub index: usize,
    pub key: AxisKey,
    pub width_pct: f64,
    pub meta: CellMeta,
}

#[derive(Debug, Clone, Copy)]
pub struct TimeAxis<'a> {
    view: ViewState,
    config: &'a TimelineConfig,
}

impl<'a> TimeAxis<'a> {
    pub fn new(view: ViewState, config: &'a TimelineConfig) -> Self {
        Self { view, config }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn len(&self) -> usize {
        match self.view.granularity {
            Granularity::Hours => 24,
            Granularity::HalfDayAm | Granularity::HalfDayPm => 12,
            Granularity::Days => 7,
            Granularity::Weeks => WEEK_AXIS_CELLS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First hour shown by an hour-based axis.
    pub fn first_hour(&self) -> u32 {
        match self.view.granularity {
            Granularity::HalfDayPm => 12,
            _ => 0,
        }
    }

    /// Days elapsed between the configured week start and the anchor.
    pub fn anchor_week_offset(&self) -> u32 {
        self.config.week_offset(self.view.anchor.weekday())
    }

    /// Builds the cell at `index`, or `None` past the end of the axis.
    pub fn cell(&self, index: usize) -> Option<AxisCell> {
        if index >= self.len() {
            return None;
        }
        let anchor = self.view.anchor;
        let even_width = 100.0 / self.len() as f64;

        match self.view.granularity {
            Granularity::Hours | Granularity::HalfDayAm | Granularity::HalfDayPm => {
                let hour = self.first_hour() + index as u32;
                Some(AxisCell {
                    label: format!("{hour:02}:00"),
                    index,
                    key: AxisKey::Hour { hour },
                    width_pct: even_width,
                    meta: CellMeta {
                        date: Some(anchor),
                        ..CellMeta::default()
                    },
                })
            }
            Granularity::Days => {
                let date = saturating_add_days(anchor, index as u32);
                Some(AxisCell {
                    label: day_label(date),
                    index,
                    key: AxisKey::Day { date },
                    width_pct: even_width,
                    meta: CellMeta {
                        date: Some(date),
                        weekday_name: Some(self.config.weekday_name(date.weekday())),
                        ..CellMeta::default()
                    },
                })
            }
            Granularity::Weeks => {
                let offset = self.anchor_week_offset();
                let start_day = week_cell_start_day(index, offset);
                let date = saturating_add_days(anchor, start_day);
                let week_start = self.config.week_start;
                let week = week_number(date, week_start);
                Some(AxisCell {
                    label: week_label(date, week_start),
                    index,
                    key: AxisKey::Week {
                        year: date.year(),
                        week,
                    },
                    width_pct: week_width_pct(index, offset),
                    meta: CellMeta {
                        date: Some(date),
                        week_number: Some(week),
                        ..CellMeta::default()
                    },
                })
            }
        }
    }

    pub fn iter(&self) -> AxisIter<'a> {
        AxisIter {
            axis: *self,
            next: 0,
        }
    }

    pub fn cells(&self) -> Vec<AxisCell> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &TimeAxis<'a> {
    type Item = AxisCell;
    type IntoIter = AxisIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct AxisIter<'a> {
    axis: TimeAxis<'a>,
    next: usize,
}

impl Iterator for AxisIter<'_> {
    type Item = AxisCell;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.axis.cell(self.next)?;
        self.next += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.axis.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AxisIter<'_> {}

/// Cells past the end of the calendar repeat its last day.
fn saturating_add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

fn days_since(week_start: Weekday, day: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// Week number counted from the week (beginning on `week_start`) that contains January 1st.
///
/// This is `ceil((day_of_year0 + days_since_week_start(jan1) + 1) / 7)` and drifts from ISO-8601
/// around year boundaries.
pub fn week_number(date: NaiveDate, week_start: Weekday) -> u32 {
    let jan1_weekday = date
        .with_ordinal(1)
        .map(|jan1| jan1.weekday())
        .unwrap_or_else(|| date.weekday());
    (date.ordinal0() + days_since(week_start, jan1_weekday) + 7) / 7
}

/// Monday of the given week, counting weeks the way [`week_number`] does.
pub fn first_day_of_week(week: u32, year: i32, week_start: Weekday) -> Option<NaiveDate> {
    if week == 0 {
        return None;
    }
    let jan1 = NaiveDate::from_yo_opt(year, 1)?;
    let back = i64::from(days_since(week_start, jan1.weekday()));
    let forward = 7 * i64::from(week - 1);
    let first = shift_days(jan1, forward - back)?;
    shift_days(first, i64::from(days_since(first.weekday(), Weekday::Mon)))
}

pub fn week_label(date: NaiveDate, week_start: Weekday) -> String {
    format!("{}-W{:02}", date.year(), week_number(date, week_start))
}

/// Parses a `YYYY-Www` label into `(year, week)`.
pub fn parse_week_label(label: &str) -> Option<(i32, u32)> {
    let (year, week) = label.trim().split_once("-W")?;
    let year = year.parse::<i32>().ok()?;
    let week = week.parse::<u32>().ok()?;
    if (1..=54).contains(&week) {
        Some((year, week))
    } else {
        None
    }
}

pub fn day_label(date: NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

pub fn parse_day_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), DAY_LABEL_FORMAT).ok()
}

pub(crate) fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_number_changes_on_the_week_start() {
        // 2023-01-01 is a Sunday.
        assert_eq!(week_number(date(2023, 1, 1), Weekday::Sun), 1);
        assert_eq!(week_number(date(2023, 1, 7), Weekday::Sun), 1);
        assert_eq!(week_number(date(2023, 1, 8), Weekday::Sun), 2);

        assert_eq!(week_number(date(2023, 1, 1), Weekday::Mon), 1);
        assert_eq!(week_number(date(2023, 1, 2), Weekday::Mon), 2);
        assert_eq!(week_number(date(2023, 1, 8), Weekday::Mon), 2);
        assert_eq!(week_number(date(2023, 1, 9), Weekday::Mon), 3);
    }

    #[test]
    fn first_day_of_week_is_monday_for_any_week_start() {
        // Sunday-based week 3 of 2025 runs 01-12..01-18.
        assert_eq!(first_day_of_week(3, 2025, Weekday::Sun), Some(date(2025, 1, 13)));
        assert_eq!(first_day_of_week(3, 2025, Weekday::Mon), Some(date(2025, 1, 13)));
        // Saturday-based week 3 of 2025 runs 01-11..01-17.
        assert_eq!(first_day_of_week(3, 2025, Weekday::Sat), Some(date(2025, 1, 13)));
    }

    #[test]
    fn week_label_round_trips_through_parser() {
        assert_eq!(parse_week_label(&week_label(date(2025, 3, 12), Weekday::Mon)), Some((2025, 11)));
        assert_eq!(parse_week_label("2025-W00"), None);
        assert_eq!(parse_week_label("W11"), None);
    }
}
