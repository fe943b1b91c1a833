pub mod event;
pub mod source;
pub mod state;

pub use event::{parse_instant, EventRecord, ScheduleEvent, NO_LINK};
pub use source::{spawn_load, EventSource};
pub use state::ScheduleState;
