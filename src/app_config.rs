use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the player configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Player behavior
    #[serde(default)]
    pub player: PlayerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Player behavior settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerConfig {
    // @field: Milliseconds without pointer movement before controls hide
    #[serde(default = "default_controls_idle_timeout_ms")]
    pub controls_idle_timeout_ms: u64,

    // @field: Volume the session starts with, in [0, 1]
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f64,

    // @field: Tick of the simulated media clock in milliseconds
    #[serde(default = "default_time_update_interval_ms")]
    pub time_update_interval_ms: u64,

    // @field: Bound of the runtime event queue
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl PlayerConfig {
    pub fn controls_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.controls_idle_timeout_ms)
    }

    pub fn time_update_interval(&self) -> Duration {
        Duration::from_millis(self.time_update_interval_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            controls_idle_timeout_ms: default_controls_idle_timeout_ms(),
            initial_volume: default_initial_volume(),
            time_update_interval_ms: default_time_update_interval_ms(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_controls_idle_timeout_ms() -> u64 {
    3000 // Hide controls after 3 seconds of inactivity
}

fn default_initial_volume() -> f64 {
    1.0
}

fn default_time_update_interval_ms() -> u64 {
    250 // Browsers fire timeupdate every 15-250ms
}

fn default_event_channel_capacity() -> usize {
    64
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let player = &self.player;

        if player.controls_idle_timeout_ms == 0 {
            return Err(anyhow!("controls_idle_timeout_ms must be greater than 0"));
        }

        if !(0.0..=1.0).contains(&player.initial_volume) {
            return Err(anyhow!(
                "initial_volume must be between 0 and 1, got {}",
                player.initial_volume
            ));
        }

        if player.time_update_interval_ms == 0 {
            return Err(anyhow!("time_update_interval_ms must be greater than 0"));
        }

        if player.event_channel_capacity == 0 {
            return Err(anyhow!("event_channel_capacity must be greater than 0"));
        }

        Ok(())
    }

    /// Load a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write this configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Load or create the configuration file and validate it
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let config = Self::load_or_create(path)
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;

        config.validate()
            .map_err(|e| AppError::Config(format!("Configuration validation failed: {}", e)))?;

        Ok(config)
    }

    /// Load the configuration, or create a default one if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            player: PlayerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
