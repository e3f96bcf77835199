//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `launchdash serve`: load the dataset and run the dashboard server
//! - `launchdash summary`: per-site launch and success counts
//! - `launchdash config show|init|path`: configuration management

use anyhow::{Result, bail};
use colored::Colorize;

use crate::analytics::events::{InteractionLog, InteractionTally};
use crate::config::{self, DashConfig};
use crate::dashboard::Dashboard;
use crate::data::SiteSummary;
use crate::web::{self, ServeOptions};

/// Output format for the summary command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Command-line overrides layered on top of the resolved config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub addr: Option<String>,
    pub open_browser: bool,
}

impl Overrides {
    /// Apply flags to `config`. `--addr` accepts `host:port` or a bare port.
    pub fn apply(&self, config: &mut DashConfig) -> Result<()> {
        if let Some(source) = &self.source {
            config.data.source = source.clone();
        }
        if let Some(addr) = &self.addr {
            let (host, port) = match addr.rsplit_once(':') {
                Some((host, port)) => (Some(host), port),
                None => (None, addr.as_str()),
            };
            let Ok(port) = port.parse::<u16>() else {
                bail!("invalid --addr '{addr}': '{port}' is not a port number");
            };
            if let Some(host) = host
                && !host.is_empty()
            {
                config.server.host = host.to_string();
            }
            config.server.port = port;
        }
        if self.open_browser {
            config.server.open_browser = true;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// launchdash serve
// ---------------------------------------------------------------------------

/// Load the dataset once, then serve until the process is stopped.
pub fn run_serve(overrides: &Overrides) -> Result<()> {
    let mut cfg = config::load();
    overrides.apply(&mut cfg)?;

    println!("Loading launch data from {}", cfg.data.source.dimmed());
    let dash = Dashboard::load(&cfg)?;

    let log = InteractionLog::from_config(&cfg.logging);
    let opts = ServeOptions {
        addr: cfg.server.addr(),
        open_browser: cfg.server.open_browser,
        access_log: cfg.logging.access_log,
    };
    web::serve(&dash, &log, &opts)
}

// ---------------------------------------------------------------------------
// launchdash summary
// ---------------------------------------------------------------------------

/// Print per-site launch statistics for the configured dataset.
pub fn run_summary(format: OutputFormat, overrides: &Overrides) -> Result<()> {
    let mut cfg = config::load();
    overrides.apply(&mut cfg)?;

    let dash = Dashboard::load(&cfg)?;
    let table = dash.table();
    let (min, max) = table.payload_range()?;
    let summaries = table.site_summaries();
    let interactions = InteractionLog::from_config(&cfg.logging).tally();

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "source": dash.source(),
                "rows": table.len(),
                "payload_min": min,
                "payload_max": max,
                "sites": summaries.iter().map(|s| serde_json::json!({
                    "site": s.site,
                    "launches": s.launches,
                    "successes": s.successes,
                    "success_pct": s.success_pct(),
                })).collect::<Vec<_>>(),
                "interactions": interactions,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            print_summary_table(dash.source(), table.len(), (min, max), &summaries);
            print_interactions(&interactions);
        }
    }

    Ok(())
}

fn print_summary_table(source: &str, rows: usize, range: (f64, f64), summaries: &[SiteSummary]) {
    println!("{}", "Launch Records Summary".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
    println!("  {} {}", "Source:       ".bold(), source);
    println!("  {} {}", "Launches:     ".bold(), rows);
    println!(
        "  {} {} to {} kg",
        "Payload range:".bold(),
        format_mass(range.0),
        format_mass(range.1)
    );
    println!();

    println!("{}", "By Launch Site".bold().cyan());
    println!(
        "  {:<24} {:>9} {:>10} {:>9}",
        "Site", "Launches", "Successes", "Rate"
    );
    println!("  {}", "-".repeat(55));

    for (i, s) in summaries.iter().enumerate() {
        let line = format!(
            "  {:<24} {:>9} {:>10} {:>8.1}%",
            truncate(&s.site, 24),
            s.launches,
            s.successes,
            s.success_pct(),
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_interactions(tally: &InteractionTally) {
    if tally.events == 0 {
        return;
    }
    println!();
    println!("{}", "Dashboard Interactions".bold().cyan());
    println!("  {} {}", "Callbacks:    ".bold(), tally.events);
    println!("  {} {}", "Page loads:   ".bold(), tally.initial_renders);
    println!("  {} {}", "Empty results:".bold(), tally.empty_results.to_string().yellow());
}

// ---------------------------------------------------------------------------
// launchdash config
// ---------------------------------------------------------------------------

/// Show the effective configuration as TOML.
pub fn run_config_show() -> Result<()> {
    println!("{}", config::show_effective_config()?);
    Ok(())
}

/// Write the default config file.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

/// Print where config files are looked up.
pub fn run_config_path() -> Result<()> {
    for (label, path) in [
        ("global ", config::global_config_file()),
        ("project", config::project_config_file()),
    ] {
        match path {
            Some(p) => {
                let marker = if p.exists() { "exists".green() } else { "absent".dimmed() };
                println!("  {label}  {}  ({marker})", p.display());
            }
            None => println!("  {label}  {}", "unavailable".yellow()),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_mass(kg: f64) -> String {
    format!("{kg:.1}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
