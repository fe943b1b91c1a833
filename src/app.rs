use std::sync::mpsc::{Receiver, TryRecvError};

use chrono::{DateTime, Local, Utc};
use color_eyre::eyre::{eyre, Result};

use crate::layout::{compute_plan, local_timezone_name, GridConfig, PositionedEvent, RenderPlan};
use crate::schedule::{
    spawn_load, EventRecord, EventSource, ScheduleEvent, ScheduleState, NO_LINK,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded(usize),
    Failed(String),
}

pub struct App {
    pub running: bool,
    pub state: ScheduleState<Local>,
    pub plan: Option<RenderPlan>,
    /// Index into `plan.events`.
    pub selected: Option<usize>,
    pub show_detail: bool,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub load_status: LoadStatus,
    source: EventSource,
    grid: GridConfig,
    zone_name: String,
    pending_load: Option<Receiver<Result<Vec<EventRecord>>>>,
    stale: bool,
    last_width: Option<f64>,
    last_minute: Option<i64>,
}

impl App {
    pub fn new(source: EventSource, week_offset: i64) -> Self {
        let mut state = ScheduleState::new(Local::now());
        state.change_week(week_offset);

        Self {
            running: true,
            state,
            plan: None,
            selected: None,
            show_detail: false,
            show_help: false,
            status_message: None,
            load_status: LoadStatus::Idle,
            source,
            grid: GridConfig::DEFAULT,
            zone_name: local_timezone_name(),
            pending_load: None,
            stale: true,
            last_width: None,
            last_minute: None,
        }
    }

    pub fn source(&self) -> &EventSource {
        &self.source
    }

    /// Kick off a background load of the events document.
    pub fn start_load(&mut self) {
        self.load_status = LoadStatus::Loading;
        self.pending_load = Some(spawn_load(self.source.clone()));
    }

    /// Drain a finished load, if any. Returns true when one was applied.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = self.pending_load.as_ref() else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(eyre!("event loader stopped without a result")),
        };
        self.pending_load = None;
        self.apply_load(result);
        true
    }

    /// Replace the event list with a load result. Failures leave the
    /// schedule empty rather than showing stale events.
    pub fn apply_load(&mut self, result: Result<Vec<EventRecord>>) {
        match result {
            Ok(records) => {
                let count = records.len();
                self.state.set_events(records);
                self.load_status = LoadStatus::Loaded(count);
            }
            Err(err) => {
                log::error!(
                    "event=source_load module=app status=error source={} error={:#}",
                    self.source,
                    err
                );
                self.state.clear_events();
                self.load_status = LoadStatus::Failed(err.to_string());
                self.status_message = Some(format!("Failed to load {}", self.source));
            }
        }
        self.invalidate();
    }

    pub fn reload(&mut self) {
        if self.load_status == LoadStatus::Loading {
            return;
        }
        self.start_load();
        self.status_message = Some("Reloading events...".to_string());
    }

    pub fn change_week(&mut self, offset_weeks: i64) {
        self.state.change_week(offset_weeks);
        log::debug!(
            "event=navigate module=app offset={} reference={}",
            offset_weeks,
            self.state.reference
        );
        self.selected = None;
        self.show_detail = false;
        self.invalidate();
    }

    pub fn next_week(&mut self) {
        self.change_week(1);
    }

    pub fn prev_week(&mut self) {
        self.change_week(-1);
    }

    pub fn go_to_today(&mut self) {
        self.state.go_to_today(Local::now());
        self.selected = None;
        self.show_detail = false;
        self.invalidate();
    }

    /// Resize trigger.
    pub fn on_resize(&mut self) {
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether the plan must be rebuilt before drawing: a trigger fired, the
    /// container changed width, or the minute rolled over (on-air state).
    pub fn needs_recompute(&self, container_width: f64, now: &DateTime<Utc>) -> bool {
        self.stale
            || self.plan.is_none()
            || self.last_width != Some(container_width)
            || self.last_minute != Some(now.timestamp() / 60)
    }

    /// Single entry point for rebuilding the render plan.
    pub fn recompute(&mut self, container_width: f64, now: &DateTime<Utc>) {
        let plan = compute_plan(&self.state, container_width, now, &self.grid, &self.zone_name);

        self.selected = match self.selected {
            Some(idx) if idx < plan.events.len() => Some(idx),
            _ => None,
        };
        if self.selected.is_none() {
            self.show_detail = false;
        }

        self.plan = Some(plan);
        self.stale = false;
        self.last_width = Some(container_width);
        self.last_minute = Some(now.timestamp() / 60);
    }

    pub fn select_next(&mut self) {
        let count = self.block_count();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(idx) => (idx + 1) % count,
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        let count = self.block_count();
        if count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => count - 1,
            Some(idx) => idx - 1,
        });
    }

    pub fn open_detail(&mut self) {
        if self.selected_block().is_some() {
            self.show_detail = true;
        }
    }

    pub fn close_detail(&mut self) {
        self.show_detail = false;
    }

    /// Select a block and follow its link, as a click does.
    pub fn activate(&mut self, idx: usize) {
        if idx >= self.block_count() {
            return;
        }
        self.selected = Some(idx);
        self.open_selected_link();
    }

    /// Link of the selected block; `None` for the `#` placeholder.
    pub fn selected_link(&self) -> Option<&str> {
        let href = self.selected_block()?.href.as_str();
        (href != NO_LINK).then_some(href)
    }

    /// Open the selected block's link in the system browser.
    pub fn open_selected_link(&mut self) {
        self.open_selected_link_with(|url| open::that_detached(url));
    }

    /// Hand the selected link to `opener`. Blocks without a link only get a
    /// status message. Returns whether `opener` was called.
    pub fn open_selected_link_with<F>(&mut self, opener: F) -> bool
    where
        F: FnOnce(&str) -> std::io::Result<()>,
    {
        if self.selected_block().is_none() {
            return false;
        }
        let Some(link) = self.selected_link().map(str::to_string) else {
            self.status_message = Some("This event has no link".to_string());
            return false;
        };

        match opener(&link) {
            Ok(()) => {
                log::info!("event=open_link module=app status=ok link={}", link);
                self.status_message = Some(format!("Opened {}", link));
            }
            Err(err) => {
                log::error!("event=open_link module=app status=error link={} error={}", link, err);
                self.status_message = Some(format!("Could not open {}", link));
            }
        }
        true
    }

    pub fn selected_block(&self) -> Option<&PositionedEvent> {
        let plan = self.plan.as_ref()?;
        plan.events.get(self.selected?)
    }

    /// Source event behind the selected block.
    pub fn selected_event(&self) -> Option<&ScheduleEvent> {
        self.state.events.get(self.selected_block()?.index)
    }

    fn block_count(&self) -> usize {
        self.plan.as_ref().map_or(0, |plan| plan.events.len())
    }
}
