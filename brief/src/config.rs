//! dailybrief configuration types and loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::connection::ResolverSettings;

/// Default API base path appended to discovered hosts
pub const DEFAULT_API_BASE_PATH: &str = "/api";

/// Local ports tried in discovery mode, in order
pub const DEFAULT_CANDIDATE_PORTS: [u16; 4] = [5000, 3001, 8000, 4000];

/// How the backend address is determined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Probe the configured address, then the local candidate ports
    #[default]
    Discovery,
    /// Use the configured address as-is; missing address is fatal
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Discovery => write!(f, "discovery"),
            Mode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discovery" | "development" | "dev" => Ok(Mode::Discovery),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("Unknown mode '{}'. Expected: discovery, production", other)),
        }
    }
}

/// Main dailybrief configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address resolution mode
    pub mode: Mode,

    /// Backend API address, e.g. http://localhost:5000/api
    #[serde(rename = "api-url")]
    pub api_url: Option<String>,

    /// Environment variable that overrides `api-url` when set
    #[serde(rename = "api-url-env")]
    pub api_url_env: String,

    /// Host used to build discovery candidates
    #[serde(rename = "candidate-host")]
    pub candidate_host: String,

    /// Ports probed in discovery mode, in order
    #[serde(rename = "candidate-ports")]
    pub candidate_ports: Vec<u16>,

    /// Path appended to a discovered host to reach the API
    #[serde(rename = "api-base-path")]
    pub api_base_path: String,

    /// Liveness probe timeout in milliseconds
    #[serde(rename = "probe-timeout-ms")]
    pub probe_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Delay before re-fetching the brief after a skip
    #[serde(rename = "skip-reload-delay-ms")]
    pub skip_reload_delay_ms: u64,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_url: None,
            api_url_env: "BRIEF_API_URL".to_string(),
            candidate_host: "localhost".to_string(),
            candidate_ports: DEFAULT_CANDIDATE_PORTS.to_vec(),
            api_base_path: DEFAULT_API_BASE_PATH.to_string(),
            probe_timeout_ms: 3_000,
            request_timeout_ms: 10_000,
            skip_reload_delay_ms: 200,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .dailybrief.yml
        let local_config = PathBuf::from(".dailybrief.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/dailybrief/dailybrief.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("dailybrief").join("dailybrief.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Effective API address: the environment variable wins over the file
    pub fn api_url(&self) -> Option<String> {
        std::env::var(&self.api_url_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_url.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn skip_reload_delay(&self) -> Duration {
        Duration::from_millis(self.skip_reload_delay_ms)
    }

    /// Snapshot everything the resolver needs, reading the environment once
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            mode: self.mode,
            configured_address: self.api_url(),
            candidate_host: self.candidate_host.clone(),
            candidate_ports: self.candidate_ports.clone(),
            api_base_path: self.api_base_path.clone(),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }
}
