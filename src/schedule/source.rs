use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;

use color_eyre::eyre::{Result, WrapErr};

use super::event::EventRecord;

pub const DEFAULT_SOURCE: &str = "events.json";

/// Where the events document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    File(PathBuf),
    Url(String),
}

impl EventSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            EventSource::Url(raw.to_string())
        } else {
            EventSource::File(PathBuf::from(raw))
        }
    }

    /// Fetch and decode the whole document. No retry and no timeout.
    pub async fn load(&self) -> Result<Vec<EventRecord>> {
        log::info!("event=source_load module=schedule status=start source={}", self);

        let records = match self {
            EventSource::File(path) => {
                let body = tokio::fs::read_to_string(path)
                    .await
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
                parse_events(&body)?
            }
            EventSource::Url(url) => reqwest::get(url)
                .await
                .wrap_err_with(|| format!("failed to fetch {}", url))?
                .error_for_status()
                .wrap_err_with(|| format!("server rejected {}", url))?
                .json::<Vec<EventRecord>>()
                .await
                .wrap_err_with(|| format!("{} did not return a JSON array of events", url))?,
        };

        log::info!(
            "event=source_load module=schedule status=ok source={} count={}",
            self,
            records.len()
        );
        Ok(records)
    }

    /// Run [`EventSource::load`] to completion on a private runtime.
    pub fn load_blocking(&self) -> Result<Vec<EventRecord>> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("failed to start loader runtime")?
            .block_on(self.load())
    }
}

impl Default for EventSource {
    fn default() -> Self {
        EventSource::File(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::File(path) => write!(f, "{}", path.display()),
            EventSource::Url(url) => f.write_str(url),
        }
    }
}

pub fn parse_events(body: &str) -> Result<Vec<EventRecord>> {
    serde_json::from_str(body).wrap_err("events document is not a JSON array of events")
}

/// Load `source` on a background thread; the single result arrives on the
/// returned channel.
pub fn spawn_load(source: EventSource) -> mpsc::Receiver<Result<Vec<EventRecord>>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(source.load_blocking());
    });
    rx
}
