//! Configuration module for the portcheck scanner

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default number of connection attempts kept in flight
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Default per-attempt connection timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Configuration for a scan run
///
/// With `concurrency == 1` the engine probes one target at a time and results
/// come back in input order. Anything higher trades ordering for throughput:
/// a full run takes at most about `ceil(targets / concurrency)` timeout
/// periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum number of connection attempts in flight at once
    pub concurrency: usize,

    /// Timeout for each connection attempt in milliseconds
    pub timeout_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ScanConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that probes one target at a time
    pub fn sequential() -> Self {
        Self {
            concurrency: 1,
            ..Self::default()
        }
    }

    /// Set the concurrency ceiling
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the per-attempt timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Get the per-attempt timeout as a Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from a TOML file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| crate::ScanError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: ScanConfig = toml::from_str(&content)
            .map_err(|e| crate::ScanError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from `~/.portcheck.toml`, falling back to defaults
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));

        let config_path = home_dir.join(".portcheck.toml");

        if config_path.exists() {
            if let Ok(config) = Self::from_toml_file(&config_path) {
                log::debug!("loaded config from {}", config_path.display());
                return config;
            }
        }

        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.concurrency == 0 {
            return Err(crate::ScanError::ConfigError(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if self.timeout_ms == 0 {
            return Err(crate::ScanError::ConfigError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
