//! Configuration loading and typed config structures for TeamSpirit.
//!
//! The canonical configuration lives in `teamspirit.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads the file. Every field
//! has a default, so a missing file or a partial file is never an error at
//! this layer.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
///
/// Mirrors the structure of `teamspirit.yaml`. All fields have sensible
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Draw settings (repeat policy and reveal schedule).
    #[serde(default)]
    pub draw: DrawConfig,

    /// Grouping settings.
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Demo-roster generation settings.
    #[serde(default)]
    pub demo: DemoConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

// -----------------------------------------------------------------------
// Draw
// -----------------------------------------------------------------------

/// Draw engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrawConfig {
    /// Whether past winners stay in the candidate pool.
    #[serde(default)]
    pub allow_repeats: bool,

    /// Reveal-animation schedule.
    #[serde(default)]
    pub spin: SpinSchedule,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            allow_repeats: false,
            spin: SpinSchedule::default(),
        }
    }
}

/// Timing schedule for the reveal animation.
///
/// The animation cycles display names at `initial_interval_ms`, and once
/// elapsed time enters the final `slowdown_window_ms` each further tick
/// stretches the interval by `slowdown_step_ms`, so the cycling visibly
/// decelerates into the commit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpinSchedule {
    /// Total cycling time before the winner is committed.
    #[serde(default = "default_spin_duration_ms")]
    pub duration_ms: u64,

    /// Delay between cycling ticks at the start of the spin. Clamped to at
    /// least 1 ms when the spin begins.
    #[serde(default = "default_spin_initial_interval_ms")]
    pub initial_interval_ms: u64,

    /// Length of the deceleration window at the end of the spin.
    #[serde(default = "default_spin_slowdown_window_ms")]
    pub slowdown_window_ms: u64,

    /// How much each tick inside the slowdown window stretches the interval.
    #[serde(default = "default_spin_slowdown_step_ms")]
    pub slowdown_step_ms: u64,
}

impl Default for SpinSchedule {
    fn default() -> Self {
        Self {
            duration_ms: default_spin_duration_ms(),
            initial_interval_ms: default_spin_initial_interval_ms(),
            slowdown_window_ms: default_spin_slowdown_window_ms(),
            slowdown_step_ms: default_spin_slowdown_step_ms(),
        }
    }
}

const fn default_spin_duration_ms() -> u64 {
    3000
}

const fn default_spin_initial_interval_ms() -> u64 {
    50
}

const fn default_spin_slowdown_window_ms() -> u64 {
    1000
}

const fn default_spin_slowdown_step_ms() -> u64 {
    10
}

// -----------------------------------------------------------------------
// Grouping
// -----------------------------------------------------------------------

/// Grouping engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupingConfig {
    /// Group size used when the caller does not supply one.
    #[serde(default = "default_group_size")]
    pub default_group_size: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            default_group_size: default_group_size(),
        }
    }
}

const fn default_group_size() -> usize {
    4
}

// -----------------------------------------------------------------------
// Demo roster
// -----------------------------------------------------------------------

/// Demo-roster generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// How many names a generated demo roster contains.
    #[serde(default = "default_demo_count")]
    pub count: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            count: default_demo_count(),
        }
    }
}

const fn default_demo_count() -> usize {
    20
}

// -----------------------------------------------------------------------
// Logging
// -----------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}
