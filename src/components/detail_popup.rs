use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::layout::PositionedEvent;
use crate::schedule::{ScheduleEvent, NO_LINK};
use crate::theme;

/// Render the selected block's details over the grid.
pub fn render_detail_popup(
    frame: &mut Frame,
    area: Rect,
    block: &PositionedEvent,
    event: &ScheduleEvent,
) {
    let popup_w = area.width.min(60).max(30);
    let popup_h = area.height.min(12).max(8);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let theme = theme::current();
    let accent = if block.on_air { theme.on_air } else { theme.event };
    let frame_block = Block::default()
        .title(format!(" {} ", block.title))
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent.bg.unwrap_or(Color::Cyan)));

    let inner = frame_block.inner(popup_area);
    frame.render_widget(frame_block, popup_area);

    let start = block.start.with_timezone(&Local);

    let mut lines: Vec<Line> = Vec::new();

    if block.on_air {
        lines.push(Line::from(Span::styled(
            " ON AIR ",
            theme.on_air.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Date: ", theme.dim),
        Span::raw(start.format("%A, %B %-d, %Y").to_string()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Time: ", theme.dim),
        Span::raw(event.duration_display(&Local)),
    ]));

    lines.push(Line::from(""));
    let link = if block.href == NO_LINK {
        Span::styled("no link", theme.dim)
    } else {
        Span::styled(
            block.href.clone(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )
    };
    lines.push(Line::from(vec![Span::styled("Link: ", theme.dim), link]));

    // Footer hint
    lines.push(Line::from(""));
    let hint = if block.href == NO_LINK {
        "Press Esc to close"
    } else {
        "Press o to open the link, Esc to close"
    };
    lines.push(Line::from(Span::styled(hint, theme.dim)));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
