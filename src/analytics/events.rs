//! Interaction logger: one JSON line per callback invocation.
//!
//! Every dropdown or slider change that reaches the binder is recorded with
//! the selection, the outputs it republished, and how long recomputation
//! took. Empty results are flagged so they can be spotted without replaying
//! the session.
//!
//! Log file: `~/.launchdash/interactions.jsonl` by default.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Event entry
// ---------------------------------------------------------------------------

/// A single callback invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub timestamp: String,
    /// Input id that fired, or `None` for the initial render.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trigger: Option<String>,
    pub site: String,
    pub payload_low: f64,
    pub payload_high: f64,
    /// Outputs republished, in publication order.
    pub outputs: Vec<OutputRecord>,
    /// Whether any published chart came back empty.
    pub empty_result: bool,
    pub duration_ms: u64,
}

/// Per-output detail inside an [`InteractionEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub output: String,
    pub rows: usize,
}

impl InteractionEvent {
    /// Build an event stamped with the current time.
    pub fn now(
        trigger: Option<&str>,
        site: &str,
        payload: (f64, f64),
        outputs: Vec<OutputRecord>,
        empty_result: bool,
        duration_ms: u64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            trigger: trigger.map(|s| s.to_string()),
            site: site.to_string(),
            payload_low: payload.0,
            payload_high: payload.1,
            outputs,
            empty_result,
            duration_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Append-only interaction log. A disabled log drops every event.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: Option<PathBuf>,
}

impl InteractionLog {
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            expand_home(&config.path)
        } else {
            None
        };
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event. Best-effort: failures are silently ignored.
    pub fn record(&self, event: &InteractionEvent) {
        if let Some(path) = &self.path {
            let _ = append_event(path, event);
        }
    }

    /// Read back every well-formed event. Malformed lines are skipped.
    pub fn read_all(&self) -> Vec<InteractionEvent> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<InteractionEvent>(&line).ok())
            .collect()
    }

    /// Aggregate counts over every logged event.
    pub fn tally(&self) -> InteractionTally {
        let events = self.read_all();
        InteractionTally {
            events: events.len(),
            initial_renders: events.iter().filter(|e| e.trigger.is_none()).count(),
            empty_results: events.iter().filter(|e| e.empty_result).count(),
        }
    }
}

/// Totals reported by `launchdash summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InteractionTally {
    pub events: usize,
    pub initial_renders: usize,
    pub empty_results: usize,
}

fn append_event(path: &Path, event: &InteractionEvent) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(event)?;
    writeln!(file, "{json}")?;

    Ok(())
}
