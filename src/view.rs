//! View state and the navigation/drill transitions over it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::axis::{TimeAxis, first_day_of_week, parse_day_label, parse_week_label, shift_days};
use crate::config::TimelineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hours,
    HalfDayAm,
    HalfDayPm,
    Days,
    Weeks,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Hours => "hours",
            Granularity::HalfDayAm => "half_day_am",
            Granularity::HalfDayPm => "half_day_pm",
            Granularity::Days => "days",
            Granularity::Weeks => "weeks",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zoom levels offered by the view-mode picker. Half-day views are only reached by drilling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Hours,
    Days,
    Weeks,
}

impl From<ZoomLevel> for Granularity {
    fn from(zoom: ZoomLevel) -> Self {
        match zoom {
            ZoomLevel::Hours => Granularity::Hours,
            ZoomLevel::Days => Granularity::Days,
            ZoomLevel::Weeks => Granularity::Weeks,
        }
    }
}

impl FromStr for ZoomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" | "hour" => Ok(ZoomLevel::Hours),
            "days" | "day" => Ok(ZoomLevel::Days),
            "weeks" | "week" => Ok(ZoomLevel::Weeks),
            other => Err(format!("unknown zoom level '{other}'")),
        }
    }
}

/// Current zoom level and anchor date. Transitions return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewState {
    pub granularity: Granularity,
    pub anchor: NaiveDate,
}

impl ViewState {
    pub fn new(granularity: Granularity, anchor: NaiveDate) -> Self {
        Self {
            granularity,
            anchor,
        }
    }

    pub fn initial(today: NaiveDate) -> Self {
        Self::new(Granularity::Days, today)
    }

    /// Instant at which the visible period begins; noon of the anchor for the afternoon view.
    pub fn period_start(&self) -> NaiveDateTime {
        let time = match self.granularity {
            Granularity::HalfDayPm => NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
            _ => NaiveTime::default(),
        };
        self.anchor.and_time(time)
    }

    pub fn advanced(self) -> Option<Self> {
        match self.granularity {
            Granularity::HalfDayAm => Some(Self::new(Granularity::HalfDayPm, self.anchor)),
            Granularity::HalfDayPm => {
                shift_days(self.anchor, 1).map(|anchor| Self::new(Granularity::HalfDayAm, anchor))
            }
            Granularity::Hours => self.with_anchor_shift(1),
            Granularity::Days => self.with_anchor_shift(7),
            Granularity::Weeks => self.with_anchor_shift(28),
        }
    }

    pub fn retreated(self) -> Option<Self> {
        match self.granularity {
            Granularity::HalfDayAm => {
                shift_days(self.anchor, -1).map(|anchor| Self::new(Granularity::HalfDayPm, anchor))
            }
            Granularity::HalfDayPm => Some(Self::new(Granularity::HalfDayAm, self.anchor)),
            Granularity::Hours => self.with_anchor_shift(-1),
            Granularity::Days => self.with_anchor_shift(-7),
            Granularity::Weeks => self.with_anchor_shift(-28),
        }
    }

    /// Target of activating a header cell, or `None` when the cell leads nowhere.
    ///
    /// Week labels are resolved with `week_start`, the same week start that numbered them.
    pub fn drilled(self, label: &str, index: usize, week_start: Weekday) -> Option<Self> {
        match self.granularity {
            Granularity::Hours => match index {
                0..12 => Some(Self::new(Granularity::HalfDayAm, self.anchor)),
                12..24 => Some(Self::new(Granularity::HalfDayPm, self.anchor)),
                _ => None,
            },
            Granularity::Days | Granularity::Weeks => {
                if let Some((year, week)) = parse_week_label(label) {
                    first_day_of_week(week, year, week_start)
                        .map(|monday| Self::new(Granularity::Days, monday))
                } else {
                    parse_day_label(label).map(|date| Self::new(Granularity::Hours, date))
                }
            }
            Granularity::HalfDayAm | Granularity::HalfDayPm => None,
        }
    }

    fn with_anchor_shift(self, days: i64) -> Option<Self> {
        shift_days(self.anchor, days).map(|anchor| Self::new(self.granularity, anchor))
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.granularity, self.anchor)
    }
}

/// Owns the single mutable [`ViewState`] of a timeline and swaps it on every transition.
///
/// The current date is always passed in by the caller so transitions stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new(today: NaiveDate) -> Self {
        Self::from_state(ViewState::initial(today))
    }

    pub fn from_state(state: ViewState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn axis<'a>(&self, config: &'a TimelineConfig) -> TimeAxis<'a> {
        TimeAxis::new(self.state, config)
    }

    pub fn advance_period(&mut self) -> ViewState {
        let next = self.state.advanced();
        self.apply("advance", next)
    }

    pub fn retreat_period(&mut self) -> ViewState {
        let next = self.state.retreated();
        self.apply("retreat", next)
    }

    pub fn select_granularity(&mut self, zoom: ZoomLevel, today: NaiveDate) -> ViewState {
        self.apply("select", Some(ViewState::new(zoom.into(), today)))
    }

    /// Moves the anchor without changing the zoom level.
    pub fn jump_to(&mut self, anchor: NaiveDate) -> ViewState {
        let next = ViewState::new(self.state.granularity, anchor);
        self.apply("jump", Some(next))
    }

    /// Drills into a header cell. Returns `false` and keeps the state when the cell is not a
    /// drill target.
    pub fn drill_into(&mut self, label: &str, index: usize, config: &TimelineConfig) -> bool {
        match self.state.drilled(label, index, config.week_start) {
            Some(next) => {
                self.apply("drill", Some(next));
                true
            }
            None => {
                debug!("ignoring drill on '{label}' (#{index}) from {}", self.state);
                false
            }
        }
    }

    /// Looks up the header cell at `index` in the current axis and drills into it.
    pub fn activate_cell(&mut self, index: usize, config: &TimelineConfig) -> bool {
        let cell = self.axis(config).cell(index);
        match cell {
            Some(cell) => self.drill_into(&cell.label, cell.index, config),
            None => {
                debug!("no header cell #{index} in {}", self.state);
                false
            }
        }
    }

    fn apply(&mut self, transition: &str, next: Option<ViewState>) -> ViewState {
        match next {
            Some(next) => {
                debug!("{transition}: {} -> {}", self.state, next);
                self.state = next;
            }
            None => warn!("{transition} from {} overflows the calendar; keeping state", self.state),
        }
        self.state
    }
}
