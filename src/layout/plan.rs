use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use super::grid::GridConfig;
use super::labels::{build_grid_labels, DayLabel, HourLabel};
use super::position::{filter_and_position_events, PositionedEvent};
use super::week::{compute_week_window, timezone_label};
use crate::schedule::ScheduleState;

/// Everything one frame needs, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub week_start: NaiveDate,
    pub week_last_day: NaiveDate,
    pub week_label: String,
    pub timezone_label: String,
    pub hour_labels: Vec<HourLabel>,
    pub day_labels: Vec<DayLabel>,
    pub events: Vec<PositionedEvent>,
    pub container_width: f64,
    pub hours_width: f64,
    pub grid: GridConfig,
}

impl RenderPlan {
    pub fn on_air(&self) -> impl Iterator<Item = &PositionedEvent> {
        self.events.iter().filter(|event| event.on_air)
    }
}

pub fn compute_plan<Tz: TimeZone>(
    state: &ScheduleState<Tz>,
    container_width: f64,
    now: &DateTime<Utc>,
    grid: &GridConfig,
    zone_name: &str,
) -> RenderPlan {
    let window = compute_week_window(&state.reference);
    let hours_width = grid.hours_pixel_width(container_width);
    let labels = build_grid_labels(window.first_day(), &grid.hours);
    let events = filter_and_position_events(&state.events, &window, grid, hours_width, now);

    log::trace!(
        "event=recompute week_start={} width={} blocks={}",
        window.first_day(),
        container_width,
        events.len()
    );

    RenderPlan {
        week_start: window.first_day(),
        week_last_day: window.last_day(),
        week_label: window.label(),
        timezone_label: timezone_label(zone_name),
        hour_labels: labels.hour_labels,
        day_labels: labels.day_labels,
        events,
        container_width,
        hours_width,
        grid: *grid,
    }
}
