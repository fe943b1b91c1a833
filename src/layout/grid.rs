use serde::Serialize;

/// Inclusive hour-of-day span shown by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleHours {
    pub start: u32,
    /// Inclusive: the last column covers `end:00` up to `end+1:00`.
    pub end: u32,
}

impl VisibleHours {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// First visible minute of the day.
    pub fn first_minute(&self) -> u32 {
        self.start * 60
    }

    /// Minute at which the last visible hour closes.
    pub fn closing_minute(&self) -> u32 {
        (self.end + 1) * 60
    }

    pub fn total_minutes(&self) -> u32 {
        self.closing_minute() - self.first_minute()
    }

    pub fn hour_count(&self) -> u32 {
        self.end + 1 - self.start
    }

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    /// Whether a clock interval fits the span without clipping.
    pub fn contains_span(&self, start_minutes: u32, end_minutes: u32) -> bool {
        start_minutes >= self.first_minute() && end_minutes <= self.closing_minute()
    }
}

/// Fixed geometry of the schedule grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridConfig {
    pub hours: VisibleHours,
    pub label_width: f64,
    pub row_height: f64,
}

impl GridConfig {
    pub const DEFAULT: GridConfig = GridConfig {
        hours: VisibleHours::new(5, 22),
        label_width: 150.0,
        row_height: 50.0,
    };

    /// Width left for the hour columns once the day-label column is taken.
    pub fn hours_pixel_width(&self, container_width: f64) -> f64 {
        (container_width - self.label_width).max(0.0)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
