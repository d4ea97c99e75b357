use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::axis::{AxisCell, TimeAxis, shift_days};
use crate::config::TimelineConfig;
use crate::geometry::{
    BarPosition, WEEK_WINDOW_DAYS, effective_end, position_in_window, position_of,
    position_of_break_within, week_cell_for_day,
};
use crate::model::{Resource, Shift};
use crate::view::{Granularity, ViewController, ViewState, ZoomLevel};

/// A break drawn inside its shift bar, positioned relative to the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakMark {
    pub break_id: String,
    pub label: String,
    pub left_pct: f64,
    pub width_pct: f64,
}

/// A shift bar. `column` is the header cell in which the bar begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub shift_id: String,
    pub label: String,
    pub date: NaiveDate,
    pub column: usize,
    pub left_pct: f64,
    pub width_pct: f64,
    pub breaks: Vec<BreakMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRow {
    pub resource_id: String,
    pub resource_name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub view: ViewState,
    pub axis_cells: Vec<AxisCell>,
    pub rows: Vec<ResourceRow>,
}

impl RenderModel {
    pub fn row(&self, resource_id: &str) -> Option<&ResourceRow> {
        self.rows.iter().find(|row| row.resource_id == resource_id)
    }
}

/// Composes the header row and one row per resource for the current view.
///
/// The grid holds the latest resource snapshot; replacing it is the only way the data
/// changes. Header activations are forwarded to the view controller.
#[derive(Debug, Clone)]
pub struct ResourceGrid {
    controller: ViewController,
    config: TimelineConfig,
    resources: Vec<Resource>,
}

impl ResourceGrid {
    pub fn new(today: NaiveDate, config: TimelineConfig) -> Self {
        Self::with_controller(ViewController::new(today), config)
    }

    pub fn with_controller(controller: ViewController, config: TimelineConfig) -> Self {
        Self {
            controller,
            config,
            resources: Vec::new(),
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.replace_resources(resources);
        self
    }

    pub fn replace_resources(&mut self, resources: Vec<Resource>) {
        debug!("grid snapshot replaced with {} resources", resources.len());
        self.resources = resources;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn view(&self) -> ViewState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ViewController {
        &mut self.controller
    }

    pub fn render(&self) -> RenderModel {
        render_model(self.view(), &self.config, &self.resources)
    }

    pub fn activate_cell(&mut self, index: usize) -> bool {
        self.controller.activate_cell(index, &self.config)
    }

    pub fn advance(&mut self) -> ViewState {
        self.controller.advance_period()
    }

    pub fn retreat(&mut self) -> ViewState {
        self.controller.retreat_period()
    }

    pub fn select_granularity(&mut self, zoom: ZoomLevel, today: NaiveDate) -> ViewState {
        self.controller.select_granularity(zoom, today)
    }

    pub fn jump_to(&mut self, anchor: NaiveDate) -> ViewState {
        self.controller.jump_to(anchor)
    }
}

pub fn render_model(
    view: ViewState,
    config: &TimelineConfig,
    resources: &[Resource],
) -> RenderModel {
    let axis = TimeAxis::new(view, config);
    RenderModel {
        view,
        axis_cells: axis.cells(),
        rows: resources
            .iter()
            .map(|resource| render_row(&axis, resource))
            .collect(),
    }
}

pub fn render_row(axis: &TimeAxis<'_>, resource: &Resource) -> ResourceRow {
    let view = axis.view();
    let bars = match view.granularity {
        Granularity::Days => (0..7u32)
            .filter_map(|day| {
                let date = shift_days(view.anchor, i64::from(day))?;
                day_bar(resource, date, day as usize)
            })
            .collect(),
        Granularity::Weeks => {
            let offset = axis.anchor_week_offset();
            (0..WEEK_WINDOW_DAYS)
                .filter_map(|day| {
                    let date = shift_days(view.anchor, i64::from(day))?;
                    day_bar(resource, date, week_cell_for_day(day, offset))
                })
                .collect()
        }
        Granularity::Hours => {
            let start_hour = resource
                .shift_on(view.anchor.weekday())
                .map(|shift| shift.interval().start.hours().floor() as usize)
                .unwrap_or(0);
            day_bar(resource, view.anchor, start_hour.min(axis.len() - 1))
                .into_iter()
                .collect()
        }
        Granularity::HalfDayAm | Granularity::HalfDayPm => {
            let first = f64::from(axis.first_hour());
            window_bar(resource, view.anchor, first, first + 12.0)
                .into_iter()
                .collect()
        }
    };

    ResourceRow {
        resource_id: resource.id.clone(),
        resource_name: resource.name.clone(),
        bars,
    }
}

/// Bar for one day column, positioned on that day's 24-hour track.
fn day_bar(resource: &Resource, date: NaiveDate, column: usize) -> Option<Bar> {
    let shift = resource.shift_on(date.weekday())?;
    let interval = shift.interval();
    let position = position_of(&interval);
    let breaks = shift
        .breaks
        .iter()
        .filter_map(|brk| {
            let mark = position_of_break_within(&interval, &brk.interval());
            if mark.is_none() {
                log_excluded_break(resource, shift, &brk.id);
            }
            mark.map(|pos| break_mark(&brk.id, &brk.name, pos))
        })
        .collect();
    Some(build_bar(shift, date, column, position, breaks))
}

/// Bar for a half-day view, scaled to the visible 12 hours and clipped at the edges.
fn window_bar(
    resource: &Resource,
    date: NaiveDate,
    window_start: f64,
    window_end: f64,
) -> Option<Bar> {
    let shift = resource.shift_on(date.weekday())?;
    let interval = shift.interval();
    let start = interval.start.hours();
    let end = effective_end(&interval);
    let position = position_in_window(start, end, window_start, window_end)?;

    let visible_start = start.max(window_start);
    let visible_end = end.min(window_end);
    let breaks = shift
        .breaks
        .iter()
        .filter_map(|brk| {
            let brk_interval = brk.interval();
            if position_of_break_within(&interval, &brk_interval).is_none() {
                log_excluded_break(resource, shift, &brk.id);
                return None;
            }
            let pos = position_in_window(
                brk_interval.start.hours(),
                effective_end(&brk_interval),
                visible_start,
                visible_end,
            )?;
            Some(break_mark(&brk.id, &brk.name, pos))
        })
        .collect();

    let column = (visible_start - window_start).floor().max(0.0) as usize;
    Some(build_bar(shift, date, column, position, breaks))
}

fn build_bar(
    shift: &Shift,
    date: NaiveDate,
    column: usize,
    position: BarPosition,
    breaks: Vec<BreakMark>,
) -> Bar {
    Bar {
        shift_id: shift.id.clone(),
        label: shift.name.clone(),
        date,
        column,
        left_pct: position.left_pct,
        width_pct: position.width_pct,
        breaks,
    }
}

fn break_mark(id: &str, name: &str, position: BarPosition) -> BreakMark {
    BreakMark {
        break_id: id.to_string(),
        label: name.to_string(),
        left_pct: position.left_pct,
        width_pct: position.width_pct,
    }
}

fn log_excluded_break(resource: &Resource, shift: &Shift, break_id: &str) {
    debug!(
        "break {break_id} of shift {} ({}) lies outside the shift; not rendered",
        shift.id, resource.id
    );
}
