use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Timelike, Utc, Weekday};
use week_schedule::layout::{compute_week_window, filter_and_position_events, GridConfig};
use week_schedule::schedule::{EventRecord, ScheduleEvent};

fn zone() -> FixedOffset {
    FixedOffset::west_opt(6 * 3600).unwrap()
}

fn local(d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    zone().with_ymd_and_hms(2025, 1, d, h, min, 0).unwrap()
}

fn event_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> ScheduleEvent {
    ScheduleEvent::from_record(
        EventRecord {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
            title: "Event".into(),
            link: None,
        },
        &zone(),
    )
}

fn far_past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn every_reference_maps_to_sunday_midnight() {
    let mut reference = zone().with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();
    let last = zone().with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

    while reference < last {
        let window = compute_week_window(&reference);
        assert_eq!(window.start.weekday(), Weekday::Sun, "{reference}");
        assert_eq!(window.start.num_seconds_from_midnight(), 0, "{reference}");
        assert!(window.start <= reference && reference < window.end, "{reference}");
        assert_eq!(window.end - window.start, Duration::days(7));
        reference += Duration::minutes(367);
    }
}

#[test]
fn week_end_belongs_to_the_next_week() {
    let this_week = compute_week_window(&local(8, 12, 0));
    let events = [event_between(this_week.end.clone(), this_week.end.clone() + Duration::hours(10))];

    let here = filter_and_position_events(&events, &this_week, &GridConfig::DEFAULT, 1000.0, &far_past());
    assert!(here.is_empty());

    // Sunday 00:00 start is outside the visible hours, so shift it into view
    let next_week = compute_week_window(&this_week.end);
    assert_eq!(next_week.start, this_week.end);
    let in_view = [event_between(
        next_week.start.clone() + Duration::hours(9),
        next_week.start.clone() + Duration::hours(10),
    )];
    let there = filter_and_position_events(&in_view, &next_week, &GridConfig::DEFAULT, 1000.0, &far_past());
    assert_eq!(there.len(), 1);
    assert_eq!(there[0].day_index, 0);

    let boundary = ScheduleEvent {
        title: "Boundary".into(),
        link: None,
        start: Some(next_week.start.with_timezone(&Utc)),
        end: Some(next_week.start.with_timezone(&Utc)),
    };
    assert!(next_week.contains(&boundary.start.unwrap()));
    assert!(!this_week.contains(&boundary.start.unwrap()));
}

#[test]
fn visible_blocks_stay_inside_the_hour_area() {
    let window = compute_week_window(&local(8, 12, 0));
    let grid = GridConfig::DEFAULT;
    let hours_width = 873.0;

    let mut events = Vec::new();
    for day in 5..12 {
        for start_minutes in (300..1380).step_by(35) {
            let start = local(day, 0, 0) + Duration::minutes(start_minutes);
            let length = ((start_minutes * 7) % 180 + 1).min(1380 - start_minutes);
            events.push(event_between(start, start + Duration::minutes(length)));
        }
    }

    let blocks = filter_and_position_events(&events, &window, &grid, hours_width, &far_past());
    assert_eq!(blocks.len(), events.len());
    for block in blocks {
        assert!(block.left >= grid.label_width, "{block:?}");
        assert!(block.right() <= grid.label_width + hours_width + 1e-9, "{block:?}");
        assert!(block.width >= 0.0);
        assert_eq!(block.height, grid.row_height);
        assert_eq!(block.top, grid.row_height * (1 + block.day_index) as f64);
    }
}

#[test]
fn on_air_flag_tracks_now_inclusively() {
    let window = compute_week_window(&local(8, 12, 0));
    let start = local(7, 14, 0);
    let end = local(7, 15, 0);
    let events = [event_between(start, end)];

    let flag_at = |now: DateTime<FixedOffset>| {
        filter_and_position_events(
            &events,
            &window,
            &GridConfig::DEFAULT,
            1000.0,
            &now.with_timezone(&Utc),
        )[0]
        .on_air
    };

    assert!(flag_at(start));
    assert!(flag_at(local(7, 14, 30)));
    assert!(flag_at(end));
    assert!(!flag_at(start - Duration::seconds(1)));
    assert!(!flag_at(end + Duration::seconds(1)));
}

#[test]
fn monday_nine_to_ten_at_1150_pixels() {
    let window = compute_week_window(&local(8, 12, 0));
    let grid = GridConfig::DEFAULT;
    let events = [event_between(local(6, 9, 0), local(6, 10, 0))];

    let blocks = filter_and_position_events(&events, &window, &grid, grid.hours_pixel_width(1150.0), &far_past());

    let block = &blocks[0];
    assert_eq!(block.day_index, 1);
    assert_eq!(block.start_minutes, 540);
    assert!((block.left - 372.2).abs() < 0.05);
    assert!((block.width - 55.6).abs() < 0.05);
    assert_eq!(block.top, 100.0);
}

#[test]
fn early_morning_events_never_render() {
    let grid = GridConfig::DEFAULT;
    for day in [5, 8, 11, 12, 19] {
        let window = compute_week_window(&local(day, 12, 0));
        let events = [event_between(local(day, 2, 0), local(day, 3, 0))];
        assert!(filter_and_position_events(&events, &window, &grid, 1000.0, &far_past()).is_empty());
    }
}

#[test]
fn clock_time_not_utc_time_drives_geometry() {
    // 15:00 UTC is 09:00 in UTC-6
    let window = compute_week_window(&local(8, 12, 0));
    let event = ScheduleEvent::from_record(
        EventRecord {
            start: "2025-01-08T15:00:00Z".into(),
            end: "2025-01-08T16:30:00Z".into(),
            title: "Remote".into(),
            link: Some("https://example.com/remote".into()),
        },
        &zone(),
    );
    let blocks = filter_and_position_events(&[event], &window, &GridConfig::DEFAULT, 1080.0, &far_past());

    assert_eq!(blocks[0].start_minutes, 540);
    assert_eq!(blocks[0].end_minutes, 630);
    assert_eq!(blocks[0].day_index, 3);
    assert!((blocks[0].left - 390.0).abs() < 1e-9);
    assert!((blocks[0].width - 90.0).abs() < 1e-9);
    assert_eq!(blocks[0].href, "https://example.com/remote");
}

#[test]
fn overlapping_events_are_both_kept() {
    let window = compute_week_window(&local(8, 12, 0));
    let events = [
        event_between(local(9, 10, 0), local(9, 12, 0)),
        event_between(local(9, 11, 0), local(9, 13, 0)),
    ];
    let blocks = filter_and_position_events(&events, &window, &GridConfig::DEFAULT, 1000.0, &far_past());
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].top, blocks[1].top);
    assert!(blocks[1].left < blocks[0].right());
}
