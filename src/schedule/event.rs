use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder href for events without a link.
pub const NO_LINK: &str = "#";

/// Date-times without an offset are read as local wall time.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One entry of the events document, exactly as served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEvent {
    pub title: String,
    pub link: Option<String>,
    /// `None` when the timestamp could not be parsed.
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ScheduleEvent {
    pub fn from_record<Tz: TimeZone>(record: EventRecord, tz: &Tz) -> Self {
        let start = parse_instant(&record.start, tz);
        let end = parse_instant(&record.end, tz);
        if start.is_none() || end.is_none() {
            log::debug!(
                "event=record_invalid_time title={:?} start={:?} end={:?}",
                record.title,
                record.start,
                record.end
            );
        }

        Self {
            title: record.title,
            link: record.link,
            start,
            end,
        }
    }

    /// Inclusive on both ends; false when either bound is invalid.
    pub fn is_on_air(&self, now: &DateTime<Utc>) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= *now && *now <= end,
            _ => false,
        }
    }

    pub fn href(&self) -> &str {
        match self.link.as_deref() {
            Some(link) if !link.trim().is_empty() => link,
            _ => NO_LINK,
        }
    }

    pub fn duration_display<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let clock = |instant: Option<DateTime<Utc>>| match instant {
            Some(instant) => instant.with_timezone(tz).format("%-I:%M %p").to_string(),
            None => "?".to_string(),
        };
        format!("{} - {}", clock(self.start), clock(self.end))
    }
}

/// Parse an ISO-8601 timestamp into an absolute instant.
///
/// Offsets are honoured; a date-time without one is local to `tz`, and a bare
/// date is UTC midnight. Returns `None` for anything else.
pub fn parse_instant<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return local_instant(tz, naive);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        // Skipped by a DST gap: move forward past it
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn offset_timestamps_are_absolute() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            parse_instant("2025-01-06T09:00:00Z", &tz),
            Some(utc(2025, 1, 6, 9, 0))
        );
        assert_eq!(
            parse_instant("2025-01-06T09:00:00-05:00", &tz),
            Some(utc(2025, 1, 6, 14, 0))
        );
    }

    #[test]
    fn naive_timestamps_are_local() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            parse_instant("2025-01-06T09:00:00", &tz),
            Some(utc(2025, 1, 6, 7, 0))
        );
        assert_eq!(
            parse_instant("2025-01-06T09:30", &tz),
            Some(utc(2025, 1, 6, 7, 30))
        );
        assert_eq!(
            parse_instant("2025-01-06 09:30", &tz),
            Some(utc(2025, 1, 6, 7, 30))
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(parse_instant("2025-01-06", &tz), Some(utc(2025, 1, 6, 0, 0)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(parse_instant("", &Utc), None);
        assert_eq!(parse_instant("next tuesday", &Utc), None);
        assert_eq!(parse_instant("2025-13-01T09:00:00Z", &Utc), None);
    }

    #[test]
    fn record_fields_default_when_missing() {
        let record: EventRecord = serde_json::from_str(r#"{"title":"Standup"}"#).unwrap();
        let event = ScheduleEvent::from_record(record, &Utc);
        assert_eq!(event.start, None);
        assert_eq!(event.href(), NO_LINK);
    }

    #[test]
    fn on_air_is_inclusive() {
        let event = ScheduleEvent {
            title: "Show".into(),
            link: Some("https://example.com".into()),
            start: Some(utc(2025, 1, 6, 9, 0)),
            end: Some(utc(2025, 1, 6, 10, 0)),
        };
        assert!(event.is_on_air(&utc(2025, 1, 6, 9, 0)));
        assert!(event.is_on_air(&utc(2025, 1, 6, 9, 30)));
        assert!(event.is_on_air(&utc(2025, 1, 6, 10, 0)));
        assert!(!event.is_on_air(&utc(2025, 1, 6, 8, 59)));
        assert!(!event.is_on_air(&utc(2025, 1, 6, 10, 1)));
        assert_eq!(event.href(), "https://example.com");
    }

    #[test]
    fn invalid_bounds_are_never_on_air() {
        let event = ScheduleEvent {
            title: "Broken".into(),
            link: Some("   ".into()),
            start: None,
            end: Some(utc(2025, 1, 6, 10, 0)),
        };
        assert!(!event.is_on_air(&utc(2025, 1, 6, 9, 0)));
        assert_eq!(event.href(), NO_LINK);
    }

    #[test]
    fn duration_display_uses_given_zone() {
        let event = ScheduleEvent {
            title: "Show".into(),
            link: None,
            start: Some(utc(2025, 1, 6, 14, 0)),
            end: Some(utc(2025, 1, 6, 15, 30)),
        };
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(event.duration_display(&tz), "9:00 AM - 10:30 AM");
    }
}
