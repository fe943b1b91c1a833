use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const BINDINGS: [(&str, &str); 9] = [
    ("h/\u{2190}", "Previous week"),
    ("l/\u{2192}", "Next week"),
    ("t", "Jump to this week"),
    ("Tab", "Select next event"),
    ("S-Tab", "Select previous event"),
    ("Enter", "Event details"),
    ("o/click", "Open event link"),
    ("r", "Reload events"),
    ("q/Esc", "Quit / close popup"),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let popup_w = area.width.min(44).max(30);
    let popup_h = area.height.min(BINDINGS.len() as u16 + 4).max(6);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let theme = theme::current();
    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.day_label.add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:<8}", key), key_style),
                Span::raw(*desc),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  ? toggles this help", theme.dim)));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
