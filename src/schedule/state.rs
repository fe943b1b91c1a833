use chrono::{DateTime, Days, Duration, TimeZone};

use super::event::{EventRecord, ScheduleEvent};
use crate::layout::week::DAYS_PER_WEEK;

/// Everything the layout engine reads: which week is shown and what events
/// exist.
#[derive(Debug, Clone)]
pub struct ScheduleState<Tz: TimeZone> {
    pub reference: DateTime<Tz>,
    pub events: Vec<ScheduleEvent>,
}

impl<Tz: TimeZone> ScheduleState<Tz> {
    pub fn new(reference: DateTime<Tz>) -> Self {
        Self {
            reference,
            events: Vec::new(),
        }
    }

    /// Move the reference by `offset_weeks * 7` calendar days, keeping the
    /// local wall-clock time.
    pub fn change_week(&mut self, offset_weeks: i64) {
        let days = offset_weeks.saturating_mul(DAYS_PER_WEEK);
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.reference.clone().checked_add_days(magnitude)
        } else {
            self.reference.clone().checked_sub_days(magnitude)
        };

        self.reference = match shifted {
            Some(reference) => reference,
            // Target wall time does not exist locally; shift by elapsed time
            None => self.reference.clone() + Duration::days(days),
        };
    }

    pub fn go_to_today(&mut self, now: DateTime<Tz>) {
        self.reference = now;
    }

    pub fn set_events(&mut self, records: Vec<EventRecord>) {
        let tz = self.reference.timezone();
        self.events = records
            .into_iter()
            .map(|record| ScheduleEvent::from_record(record, &tz))
            .collect();
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
