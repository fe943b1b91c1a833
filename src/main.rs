use std::time::Duration;

use chrono::{Local, Utc};
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

use week_schedule::app::App;
use week_schedule::cli::{Cli, Settings};
use week_schedule::components::{render_detail_popup, render_help, ScheduleView, StatusBar};
use week_schedule::config::Config;
use week_schedule::event::{self, InputEvent};
use week_schedule::layout::{self, GridConfig};
use week_schedule::schedule::ScheduleState;
use week_schedule::{logging, theme, tui};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let settings = cli.resolve(&config);
    logging::init_logging(&settings.log_level, &settings.log_dir)?;
    theme::init(&config.theme);

    if cli.dump_plan {
        return dump_plan(&settings, cli.width);
    }

    let mut app = App::new(settings.source.clone(), settings.week_offset);
    app.start_load();

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    log::info!("event=app_exit module=main status={}", if result.is_ok() { "ok" } else { "error" });
    result
}

/// Headless mode: load once, print the plan for `width` pixels.
fn dump_plan(settings: &Settings, width: f64) -> Result<()> {
    let mut state = ScheduleState::new(Local::now());
    state.change_week(settings.week_offset);

    match settings.source.load_blocking() {
        Ok(records) => state.set_events(records),
        Err(err) => {
            log::error!("event=source_load module=main status=error error={:#}", err);
            eprintln!("warning: {:#}", err);
        }
    }

    let plan = layout::compute_plan(
        &state,
        width,
        &Utc::now(),
        &GridConfig::DEFAULT,
        &layout::local_timezone_name(),
    );
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    // Where the last frame drew the grid, for mouse hit-testing.
    let mut schedule_inner = Rect::default();

    while app.running {
        app.poll_load();

        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: schedule + status bar
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            schedule_inner = ScheduleView::inner(layout[0]);
            let width = ScheduleView::container_width(schedule_inner, area);
            let now = Utc::now();
            if app.needs_recompute(width, &now) {
                app.recompute(width, &now);
            }

            ScheduleView::render(
                frame,
                layout[0],
                app.plan.as_ref(),
                app.selected,
                Local::now().date_naive(),
            );

            if app.show_detail {
                if let (Some(block), Some(event)) = (app.selected_block(), app.selected_event()) {
                    render_detail_popup(frame, area, block, event);
                }
            }

            if app.show_help {
                render_help(frame, area);
            }

            StatusBar::render(frame, layout[1], app);
        })?;

        match event::next_input_event(Duration::from_millis(100))? {
            Some(InputEvent::Key(key)) => handle_key(app, key),
            Some(InputEvent::Click { column, row }) => handle_click(app, schedule_inner, column, row),
            Some(InputEvent::Resize(..)) => app.on_resize(),
            None => {}
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Clear status message on any key
    app.status_message = None;

    // Help overlay takes priority
    if app.show_help {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            app.show_help = false;
        }
        return;
    }

    // Detail popup takes priority
    if app.show_detail {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.close_detail(),
            KeyCode::Char('o') => app.open_selected_link(),
            _ => {}
        }
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_week(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_week(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Tab, _) => app.select_next(),
        (KeyCode::BackTab, _) => app.select_prev(),
        (KeyCode::Enter, _) => app.open_detail(),
        (KeyCode::Char('o'), _) => app.open_selected_link(),
        (KeyCode::Char('r'), _) => app.reload(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_click(app: &mut App, schedule_inner: Rect, column: u16, row: u16) {
    if app.show_help || app.show_detail {
        return;
    }
    let hit = app
        .plan
        .as_ref()
        .and_then(|plan| ScheduleView::block_at(schedule_inner, plan, column, row));
    if let Some(idx) = hit {
        app.status_message = None;
        app.activate(idx);
    }
}
