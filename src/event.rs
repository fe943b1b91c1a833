use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Terminal input the UI loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Left button pressed at a terminal cell.
    Click { column: u16, row: u16 },
    Resize(u16, u16),
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Wait up to `timeout` for a key press, click or resize; other input is
/// skipped.
pub fn next_input_event(timeout: Duration) -> color_eyre::Result<Option<InputEvent>> {
    loop {
        match poll_event(timeout)? {
            Some(event) => {
                if let Some(input) = classify(event) {
                    return Ok(Some(input));
                }
            }
            None => return Ok(None),
        }
    }
}

fn classify(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(InputEvent::Key(key)),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::Click {
                column: mouse.column,
                row: mouse.row,
            })
        }
        Event::Resize(cols, rows) => Some(InputEvent::Resize(cols, rows)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseEvent};

    #[test]
    fn only_presses_and_resizes_are_kept() {
        let press = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(classify(Event::Key(press)), Some(InputEvent::Key(press)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert_eq!(classify(Event::Key(release)), None);

        assert_eq!(
            classify(Event::Resize(120, 40)),
            Some(InputEvent::Resize(120, 40))
        );
        assert_eq!(classify(Event::FocusGained), None);
    }

    #[test]
    fn only_left_button_presses_are_clicks() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 12,
                row: 4,
                modifiers: KeyModifiers::NONE,
            })
        };

        assert_eq!(
            classify(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::Click { column: 12, row: 4 })
        );
        assert_eq!(classify(mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(classify(mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(classify(mouse(MouseEventKind::Moved)), None);
    }
}
