//! Weekly schedule grid: a pure layout engine plus a terminal front end.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod event;
pub mod layout;
pub mod logging;
pub mod schedule;
pub mod theme;
pub mod tui;
