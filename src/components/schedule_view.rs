use chrono::NaiveDate;
use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::layout::{PositionedEvent, RenderPlan};
use crate::theme;

/// Horizontal pixels represented by one terminal column.
pub const PX_PER_COLUMN: f64 = 10.0;
/// Vertical pixels represented by one terminal line.
pub const PX_PER_LINE: f64 = 25.0;

pub struct ScheduleView;

impl ScheduleView {
    fn block(plan: Option<&RenderPlan>) -> Block<'static> {
        let theme = theme::current();
        let (title, footer) = match plan {
            Some(plan) => (
                format!(" Week of {} ", plan.week_label),
                format!(" {} ", plan.timezone_label),
            ),
            None => (" Week ".to_string(), String::new()),
        };

        Block::default()
            .title(title)
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(footer, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border)
    }

    /// The render target: the area inside the schedule border.
    pub fn inner(area: Rect) -> Rect {
        Self::block(None).inner(area)
    }

    /// Pixel width of the render target, falling back to the whole viewport
    /// when the target reports no width.
    pub fn container_width(inner: Rect, viewport: Rect) -> f64 {
        let cols = if inner.width == 0 {
            viewport.width
        } else {
            inner.width
        };
        cols as f64 * PX_PER_COLUMN
    }

    /// Rebuild the whole grid from `plan`.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        plan: Option<&RenderPlan>,
        selected: Option<usize>,
        today: NaiveDate,
    ) {
        let block = Self::block(plan);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(plan) = plan else {
            let msg = Paragraph::new("Loading events...").style(theme::current().dim);
            frame.render_widget(msg, inner);
            return;
        };

        render_hour_header(frame, inner, plan);
        render_day_rows(frame, inner, plan, today);

        for (idx, event) in plan.events.iter().enumerate() {
            render_event(frame, inner, event, selected == Some(idx));
        }
    }

    /// Index of the block drawn under a terminal cell. Later blocks are drawn
    /// on top, so they win.
    pub fn block_at(inner: Rect, plan: &RenderPlan, column: u16, row: u16) -> Option<usize> {
        let cell = Position::new(column, row);
        plan.events
            .iter()
            .enumerate()
            .rev()
            .find(|(_, event)| event_rect(inner, event).contains(cell))
            .map(|(idx, _)| idx)
    }
}

fn render_hour_header(frame: &mut Frame, inner: Rect, plan: &RenderPlan) {
    let theme = theme::current();
    let count = plan.grid.hours.hour_count().max(1) as f64;
    let mut next_free = inner.x.saturating_add(to_columns(plan.grid.label_width));

    for (i, label) in plan.hour_labels.iter().enumerate() {
        let px = plan.grid.label_width + i as f64 * plan.hours_width / count;
        let x = inner.x.saturating_add(to_columns(px));
        // Skip labels that would run into the previous one
        if x < next_free {
            continue;
        }

        let width = label.text.chars().count() as u16;
        let rect = Rect::new(x, inner.y, width, 1).intersection(inner);
        if rect.is_empty() {
            continue;
        }
        frame.render_widget(
            Paragraph::new(Span::styled(label.text.clone(), theme.hour_label)),
            rect,
        );
        next_free = x.saturating_add(width + 1);
    }
}

fn render_day_rows(frame: &mut Frame, inner: Rect, plan: &RenderPlan, today: NaiveDate) {
    let theme = theme::current();
    let label_cols = to_columns(plan.grid.label_width);
    let row_lines = to_lines(plan.grid.row_height).max(1);
    let ticks = hour_ticks(plan);

    for (i, day) in plan.day_labels.iter().enumerate() {
        let top = plan.grid.row_height * (1 + i) as f64;
        let y = inner.y.saturating_add(to_lines(top));

        let style = if day.date == today {
            theme.today
        } else {
            theme.day_label
        };
        let label_rect = Rect::new(inner.x, y, label_cols, row_lines).intersection(inner);
        if !label_rect.is_empty() {
            frame.render_widget(Paragraph::new(Span::styled(day.text.clone(), style)), label_rect);
        }

        let tick_rect = Rect::new(
            inner.x.saturating_add(label_cols),
            y,
            inner.width.saturating_sub(label_cols),
            1,
        )
        .intersection(inner);
        if !tick_rect.is_empty() {
            frame.render_widget(Paragraph::new(Span::styled(ticks.clone(), theme.dim)), tick_rect);
        }
    }
}

/// A dotted line marking where each visible hour begins.
fn hour_ticks(plan: &RenderPlan) -> String {
    let width = to_columns(plan.hours_width) as usize;
    let count = plan.grid.hours.hour_count().max(1) as f64;
    let mut ticks = vec![' '; width];
    for i in 0..plan.hour_labels.len() {
        let col = to_columns(i as f64 * plan.hours_width / count) as usize;
        if let Some(cell) = ticks.get_mut(col) {
            *cell = '\u{b7}';
        }
    }
    ticks.into_iter().collect()
}

fn render_event(frame: &mut Frame, inner: Rect, event: &PositionedEvent, is_selected: bool) {
    let rect = event_rect(inner, event);
    if rect.is_empty() {
        return;
    }

    let theme = theme::current();
    let style = if is_selected {
        theme.selected
    } else if event.on_air {
        theme.on_air
    } else {
        theme.event
    };
    let text = if event.on_air {
        format!("\u{25cf} {}", event.title)
    } else {
        event.title.clone()
    };

    frame.render_widget(
        Paragraph::new(text).style(style).wrap(Wrap { trim: true }),
        rect,
    );
}

/// Terminal cells covered by an event block, clipped to the grid.
pub fn event_rect(inner: Rect, event: &PositionedEvent) -> Rect {
    let x = inner.x.saturating_add(to_columns(event.left));
    let y = inner.y.saturating_add(to_lines(event.top));
    let width = to_columns(event.width).max(1);
    let height = to_lines(event.height).max(1);
    Rect::new(x, y, width, height).intersection(inner)
}

fn to_columns(px: f64) -> u16 {
    px_to_cells(px, PX_PER_COLUMN)
}

fn to_lines(px: f64) -> u16 {
    px_to_cells(px, PX_PER_LINE)
}

fn px_to_cells(px: f64, per_cell: f64) -> u16 {
    (px / per_cell).round().clamp(0.0, u16::MAX as f64) as u16
}
