use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging;
use crate::schedule::EventSource;

#[derive(Debug, Parser)]
#[command(name = "week-schedule", version, about = "Weekly schedule grid for the terminal")]
pub struct Cli {
    /// Events document: a JSON file path or an http(s) URL
    #[arg(short, long)]
    pub source: Option<String>,

    /// Config file (default: <config dir>/week-schedule/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub log_level: Option<String>,

    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Start this many weeks away from the current one
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    pub week: i64,

    /// Print the computed render plan as JSON and exit
    #[arg(long)]
    pub dump_plan: bool,

    /// Container width in pixels for --dump-plan
    #[arg(long, default_value_t = 1150.0)]
    pub width: f64,
}

/// Command line merged over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: EventSource,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub week_offset: i64,
}

impl Cli {
    pub fn resolve(&self, config: &Config) -> Settings {
        let source = self
            .source
            .as_deref()
            .or(config.source.as_deref())
            .map(EventSource::parse)
            .unwrap_or_default();

        Settings {
            source,
            log_level: self
                .log_level
                .clone()
                .or_else(|| config.log_level.clone())
                .unwrap_or_else(|| logging::default_log_level().to_string()),
            log_dir: self
                .log_dir
                .clone()
                .or_else(|| config.log_dir.clone())
                .unwrap_or_else(logging::default_log_dir),
            week_offset: self.week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_wins_over_config() {
        let cli = Cli::try_parse_from([
            "week-schedule",
            "--source",
            "https://example.com/e.json",
            "--week",
            "-2",
        ])
        .unwrap();
        let config = Config {
            source: Some("local.json".into()),
            log_level: Some("warn".into()),
            ..Default::default()
        };

        let settings = cli.resolve(&config);
        assert_eq!(
            settings.source,
            EventSource::Url("https://example.com/e.json".into())
        );
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.week_offset, -2);
    }

    #[test]
    fn defaults_to_events_json() {
        let cli = Cli::try_parse_from(["week-schedule"]).unwrap();
        let settings = cli.resolve(&Config::default());
        assert_eq!(settings.source, EventSource::default());
        assert!(!cli.dump_plan);
        assert_eq!(cli.width, 1150.0);
    }
}
