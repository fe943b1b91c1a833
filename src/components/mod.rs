pub mod detail_popup;
pub mod help;
pub mod schedule_view;
pub mod status_bar;

pub use detail_popup::render_detail_popup;
pub use help::render_help;
pub use schedule_view::ScheduleView;
pub use status_bar::StatusBar;
