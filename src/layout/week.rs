use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DAYS_PER_WEEK: i64 = 7;

/// Half-open local interval `[Sunday 00:00, next Sunday 00:00)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Window of the week containing `reference`, in the reference's own zone.
pub fn compute_week_window<Tz: TimeZone>(reference: &DateTime<Tz>) -> WeekWindow<Tz> {
    let tz = reference.timezone();
    let date = reference.date_naive();
    let sunday = date - Duration::days(date.weekday().num_days_from_sunday() as i64);

    WeekWindow {
        start: local_midnight(&tz, sunday),
        end: local_midnight(&tz, sunday + Duration::days(DAYS_PER_WEEK)),
    }
}

/// Midnight of `date` in `tz`. When midnight falls in a DST gap the first
/// existing instant after it is used.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

impl<Tz: TimeZone> WeekWindow<Tz> {
    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Inclusive last day, used for display only.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day() + Duration::days(DAYS_PER_WEEK - 1)
    }

    /// e.g. `"Jan 5 - Jan 11"`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.first_day().format("%b %-d"),
            self.last_day().format("%b %-d")
        )
    }
}

pub fn timezone_label(zone_name: &str) -> String {
    format!("Times shown in your local timezone: {}", zone_name)
}

/// IANA name of the viewer's zone. `TZ` wins when set; otherwise the platform
/// setting is asked, falling back to the current UTC offset.
pub fn local_timezone_name() -> String {
    let from_env = std::env::var("TZ").ok();
    zone_name_from(from_env.as_deref(), iana_time_zone::get_timezone().ok())
        .unwrap_or_else(|| Local::now().format("UTC%:z").to_string())
}

fn zone_name_from(tz_env: Option<&str>, system: Option<String>) -> Option<String> {
    let from_env = tz_env
        .map(|tz| tz.trim_start_matches(':').trim())
        .filter(|tz| !tz.is_empty())
        .map(str::to_string);
    from_env.or_else(|| system.filter(|zone| !zone.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Weekday};

    fn at(tz: &FixedOffset, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        tz.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn window_starts_on_sunday_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        // Wednesday 2025-01-08 15:42
        let window = compute_week_window(&at(&tz, 2025, 1, 8, 15, 42));

        assert_eq!(window.start, at(&tz, 2025, 1, 5, 0, 0));
        assert_eq!(window.end, at(&tz, 2025, 1, 12, 0, 0));
        assert_eq!(window.start.weekday(), Weekday::Sun);
        assert_eq!(window.start.hour(), 0);
    }

    #[test]
    fn sunday_reference_is_its_own_week_start() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let window = compute_week_window(&at(&tz, 2025, 3, 2, 0, 0));
        assert_eq!(window.start, at(&tz, 2025, 3, 2, 0, 0));

        let late = compute_week_window(&at(&tz, 2025, 3, 1, 23, 59));
        assert_eq!(late.start, at(&tz, 2025, 2, 23, 0, 0));
    }

    #[test]
    fn window_uses_local_date_not_utc_date() {
        // 2025-01-05 02:00 UTC is still Saturday evening in UTC-5.
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let reference = Utc
            .with_ymd_and_hms(2025, 1, 5, 2, 0, 0)
            .unwrap()
            .with_timezone(&tz);
        let window = compute_week_window(&reference);
        assert_eq!(window.first_day(), NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
    }

    #[test]
    fn upper_bound_is_exclusive() {
        let window = compute_week_window(&Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).unwrap());
        let end = window.end.with_timezone(&Utc);
        assert!(!window.contains(&end));
        assert!(window.contains(&window.start.with_timezone(&Utc)));
        assert!(window.contains(&(end - Duration::seconds(1))));
    }

    #[test]
    fn label_spans_sunday_to_saturday() {
        let window = compute_week_window(&Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).unwrap());
        assert_eq!(window.label(), "Jan 5 - Jan 11");

        let across_months =
            compute_week_window(&Utc.with_ymd_and_hms(2025, 1, 30, 0, 0, 0).unwrap());
        assert_eq!(across_months.label(), "Jan 26 - Feb 1");
    }

    #[test]
    fn tz_variable_overrides_system_zone() {
        assert_eq!(
            zone_name_from(Some(":Europe/Paris"), Some("America/Chicago".into())),
            Some("Europe/Paris".to_string())
        );
        assert_eq!(
            zone_name_from(Some("  "), Some("America/Chicago".into())),
            Some("America/Chicago".to_string())
        );
        assert_eq!(zone_name_from(None, Some(String::new())), None);
    }

    #[test]
    fn zone_name_is_never_empty() {
        assert!(!local_timezone_name().is_empty());
    }

    #[test]
    fn timezone_label_names_the_zone() {
        assert_eq!(
            timezone_label("America/Chicago"),
            "Times shown in your local timezone: America/Chicago"
        );
    }
}
