/// Configuration schema and defaults for launchdash.
///
/// Defines the TOML-serializable configuration structure with sections
/// `[data]`, `[server]`, `[slider]`, and `[logging]`. Every field has a
/// built-in default; users only set what they want to override.
use serde::{Deserialize, Serialize};

/// Public launch dataset used when no source is configured.
pub const DEFAULT_DATA_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/dataset_part_2.csv";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level launchdash configuration.
///
/// Maps to `~/.launchdash/config.toml` and `.launchdash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub slider: SliderConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [data]
// ---------------------------------------------------------------------------

/// Where the launch CSV comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// `http(s)://` URL or filesystem path of the launch CSV.
    pub source: String,
    /// Timeout for fetching a URL source (milliseconds).
    pub timeout_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_SOURCE.to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the dashboard in the system browser after binding.
    pub open_browser: bool,
}

impl ServerConfig {
    /// `host:port` socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            open_browser: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [slider]
// ---------------------------------------------------------------------------

/// Payload slider domain. Independent of the data's actual payload range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Tick positions; each is labelled with its own value.
    pub marks: Vec<f64>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            marks: vec![0.0, 2_500.0, 5_000.0, 7_500.0, 10_000.0],
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether callback invocations are appended to the interaction log.
    pub enabled: bool,
    /// Interaction log path. `~` is expanded to the home directory.
    pub path: String,
    /// Print one line per HTTP request to stdout.
    pub access_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.launchdash/interactions.jsonl".to_string(),
            access_log: true,
        }
    }
}

impl DashConfig {
    /// Annotated default config written by `launchdash config init`.
    pub fn default_toml() -> String {
        format!(
            r#"# launchdash Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Command-line flags
#   2. Environment variables (LAUNCHDASH_*)
#   3. Project config (.launchdash.toml in current directory)
#   4. User global config (~/.launchdash/config.toml)
#   5. Built-in defaults

[data]
source = "{DEFAULT_DATA_SOURCE}"
timeout_ms = 30000                    # Only applies to http(s) sources

[server]
host = "127.0.0.1"
port = 8050
open_browser = false

[slider]
min = 0.0
max = 10000.0
step = 1000.0
marks = [0.0, 2500.0, 5000.0, 7500.0, 10000.0]

[logging]
enabled = true                        # Append callback invocations as JSONL
path = "~/.launchdash/interactions.jsonl"
access_log = true                     # One stdout line per request
"#
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_produces_defaults() {
        let config: DashConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.server.addr(), "127.0.0.1:8050");
    }

    #[test]
    fn default_toml_parses_back() {
        let config: DashConfig = toml::from_str(&DashConfig::default_toml()).unwrap();
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml_str = r#"
[server]
port = 9000
"#;
        let config: DashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.source, DEFAULT_DATA_SOURCE);
    }

    #[test]
    fn slider_accepts_integer_values() {
        let toml_str = r#"
[slider]
max = 12000
marks = [0, 6000, 12000]
"#;
        let config: DashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.slider.max, 12000.0);
        assert_eq!(config.slider.marks, vec![0.0, 6000.0, 12000.0]);
    }
}
