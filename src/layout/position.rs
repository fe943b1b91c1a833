use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::Serialize;

use super::grid::GridConfig;
use super::week::WeekWindow;
use crate::schedule::ScheduleEvent;

/// An event placed on the grid, in pixels relative to the container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    /// Index into the source event list.
    pub index: usize,
    pub title: String,
    pub href: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// 0 = Sunday.
    pub day_index: u32,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub on_air: bool,
}

impl PositionedEvent {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Select the events of `window` that fit the visible hours and compute
/// their geometry.
///
/// Events belong to the week holding their start instant only. Clock times
/// are read in the window's zone, so a block's width follows local start and
/// end times rather than elapsed duration. Events reaching outside the
/// visible hours are dropped, not clipped. Input order is kept and
/// overlapping events are left overlapping.
pub fn filter_and_position_events<Tz: TimeZone>(
    events: &[ScheduleEvent],
    window: &WeekWindow<Tz>,
    grid: &GridConfig,
    hours_pixel_width: f64,
    now: &DateTime<Utc>,
) -> Vec<PositionedEvent> {
    let tz = window.start.timezone();
    events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
            position_event(index, event, window, &tz, grid, hours_pixel_width, now)
        })
        .collect()
}

fn position_event<Tz: TimeZone>(
    index: usize,
    event: &ScheduleEvent,
    window: &WeekWindow<Tz>,
    tz: &Tz,
    grid: &GridConfig,
    hours_pixel_width: f64,
    now: &DateTime<Utc>,
) -> Option<PositionedEvent> {
    let (start, end) = (event.start?, event.end?);
    if !window.contains(&start) {
        return None;
    }

    let local_start = start.with_timezone(tz);
    let day_index = local_start.weekday().num_days_from_sunday();
    let start_minutes = minute_of_day(&local_start);
    let end_minutes = minute_of_day(&end.with_timezone(tz));

    if !grid.hours.contains_span(start_minutes, end_minutes) {
        log::trace!(
            "event=block_dropped reason=outside_hours index={} start_minutes={} end_minutes={}",
            index,
            start_minutes,
            end_minutes
        );
        return None;
    }
    if end_minutes < start_minutes {
        log::trace!("event=block_dropped reason=negative_width index={}", index);
        return None;
    }

    let total_minutes = grid.hours.total_minutes() as f64;
    let left_ratio = (start_minutes - grid.hours.first_minute()) as f64 / total_minutes;
    let width_ratio = (end_minutes - start_minutes) as f64 / total_minutes;

    Some(PositionedEvent {
        index,
        title: event.title.clone(),
        href: event.href().to_string(),
        start,
        end,
        day_index,
        start_minutes,
        end_minutes,
        top: grid.row_height * (1 + day_index) as f64,
        left: grid.label_width + left_ratio * hours_pixel_width,
        width: width_ratio * hours_pixel_width,
        height: grid.row_height,
        on_air: event.is_on_air(now),
    })
}

fn minute_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> u32 {
    instant.hour() * 60 + instant.minute()
}
