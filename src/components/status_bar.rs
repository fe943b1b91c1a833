use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, LoadStatus};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = theme::current();
        let w = area.width as usize;

        let (left, left_style) = match &app.load_status {
            LoadStatus::Failed(_) => (format!(" Failed to load {} ", app.source()), theme.error),
            LoadStatus::Loading => (" Loading... ".to_string(), theme.status),
            LoadStatus::Idle => (" ".to_string(), theme.status),
            LoadStatus::Loaded(count) => {
                let on_air = app.plan.as_ref().map_or(0, |plan| plan.on_air().count());
                let shown = app.plan.as_ref().map_or(0, |plan| plan.events.len());
                let mut text = format!(" {} of {} events this week ", shown, count);
                if on_air > 0 {
                    text.push_str(&format!("\u{25cf} {} on air ", on_air));
                }
                (text, theme.status)
            }
        };

        // Status message first, then context-aware hints
        let right = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else if w >= 86 {
            " h/l:Week t:Today Tab:Select Enter:Detail o:Open r:Reload ?:Help q:Quit ".to_string()
        } else if w >= 50 {
            " h/l:Week Tab:Select ?:Help q:Quit ".to_string()
        } else {
            " ?:Help q:Quit ".to_string()
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, left_style),
            Span::styled(padding, theme.status),
            Span::styled(right, theme.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}
