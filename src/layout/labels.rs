use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::grid::VisibleHours;
use super::week::DAYS_PER_WEEK;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourLabel {
    pub hour: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLabel {
    pub text: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridLabels {
    pub hour_labels: Vec<HourLabel>,
    pub day_labels: Vec<DayLabel>,
}

/// 24-hour value to `"H:00 AM"` / `"H:00 PM"`.
pub fn format_hour_label(hour: u32) -> String {
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", hour12, meridiem)
}

pub fn build_grid_labels(week_start: NaiveDate, hours: &VisibleHours) -> GridLabels {
    let hour_labels = hours
        .hours()
        .map(|hour| HourLabel {
            hour,
            text: format_hour_label(hour),
        })
        .collect();

    let day_labels = (0..DAYS_PER_WEEK)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            DayLabel {
                text: format!("{} {}", DAY_NAMES[offset as usize], date.format("%-m/%-d")),
                date,
            }
        })
        .collect();

    GridLabels {
        hour_labels,
        day_labels,
    }
}
