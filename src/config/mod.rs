/// Configuration system for launchdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**, from [`schema::DashConfig::default()`]
/// 2. **User global config**, `~/.launchdash/config.toml`
/// 3. **Project local config**, `.launchdash.toml` in the working directory
/// 4. **Environment variables**, `LAUNCHDASH_*` overrides
///
/// Later layers override earlier ones at the field level: file layers are
/// merged as TOML tables before deserialization, so a file that only sets
/// `server.port` leaves every other key from the previous layer intact. A
/// layer that does not fit the schema is skipped on its own.
/// Command-line flags are applied on top by the caller.
///
/// # Usage
///
/// ```rust,ignore
/// use launchdash::config;
///
/// let cfg = config::load();
/// println!("serving on {}", cfg.server.addr());
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::DashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges defaults → global TOML → project TOML → env vars.
pub fn load() -> DashConfig {
    let layers: Vec<toml::Value> = [global_config_path(), project_config_path()]
        .into_iter()
        .filter_map(load_toml_value)
        .collect();

    let mut config = resolve(&layers);
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Merge file layers over the defaults and deserialize the result.
///
/// Each layer is merged into a candidate first and kept only if the
/// candidate still fits the schema, so one bad file never discards the
/// layers around it.
pub fn resolve(layers: &[toml::Value]) -> DashConfig {
    let Ok(mut merged) = toml::Value::try_from(DashConfig::default()) else {
        return DashConfig::default();
    };

    for layer in layers {
        let mut candidate = merged.clone();
        merge_values(&mut candidate, layer);
        let parsed: Result<DashConfig, _> = candidate.clone().try_into();
        if parsed.is_ok() {
            merged = candidate;
        }
    }

    merged.try_into().unwrap_or_default()
}

/// Read a TOML file as a raw value tree.
///
/// Missing or malformed files yield `None` and are skipped.
fn load_toml_value(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively overlay `overlay` onto `base`. Tables merge key by key; any
/// other value replaces the base value.
fn merge_values(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.launchdash/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".launchdash").join("config.toml"))
}

/// Path to the project local config: `.launchdash.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".launchdash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    if path == "~" {
        return dirs::home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `LAUNCHDASH_SOURCE`: CSV URL or path
/// - `LAUNCHDASH_HOST`: bind host
/// - `LAUNCHDASH_PORT`: bind port
/// - `LAUNCHDASH_OPEN_BROWSER`: open the browser on start (`1`/`true`/`yes`/`on`)
/// - `LAUNCHDASH_LOG`: interaction log enabled
pub fn apply_env_overrides<F>(config: &mut DashConfig, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = var("LAUNCHDASH_SOURCE")
        && !val.is_empty()
    {
        config.data.source = val;
    }
    if let Some(val) = var("LAUNCHDASH_HOST")
        && !val.is_empty()
    {
        config.server.host = val;
    }
    if let Some(val) = var("LAUNCHDASH_PORT")
        && let Ok(port) = val.parse::<u16>()
    {
        config.server.port = port;
    }
    if let Some(val) = var("LAUNCHDASH_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
    if let Some(val) = var("LAUNCHDASH_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.launchdash/config.toml`.
///
/// Returns an error if the file already exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.launchdash/ directory")?;
    }

    fs::write(&path, DashConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
