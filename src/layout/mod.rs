//! Schedule layout engine: week windowing and grid geometry.
//!
//! Nothing here touches the terminal. [`compute_plan`] is a pure function of
//! the schedule state, the container width and the current instant.

pub mod grid;
pub mod labels;
pub mod plan;
pub mod position;
pub mod week;

pub use grid::{GridConfig, VisibleHours};
pub use labels::{build_grid_labels, format_hour_label, DayLabel, GridLabels, HourLabel};
pub use plan::{compute_plan, RenderPlan};
pub use position::{filter_and_position_events, PositionedEvent};
pub use week::{compute_week_window, local_timezone_name, timezone_label, WeekWindow};
