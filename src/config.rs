use crate::domain::pomodoro::{DEFAULT_LONG_BREAK_MIN, DEFAULT_SHORT_BREAK_MIN, DEFAULT_WORK_MIN};
use crate::domain::{validate_sleep_hours, TimerDurations, TimerError, DEFAULT_SLEEP_HOURS};
use crate::persistence::data_file;
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Optional Pomodoro lengths in minutes; unset fields keep the 25/5/15 defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroConfig {
    pub work_minutes: Option<i64>,
    pub short_break_minutes: Option<i64>,
    pub long_break_minutes: Option<i64>,
}

impl PomodoroConfig {
    pub fn durations(&self) -> Result<TimerDurations, TimerError> {
        TimerDurations::from_minutes(
            self.work_minutes.unwrap_or(DEFAULT_WORK_MIN),
            self.short_break_minutes.unwrap_or(DEFAULT_SHORT_BREAK_MIN),
            self.long_break_minutes.unwrap_or(DEFAULT_LONG_BREAK_MIN),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganiserConfig {
    /// Where the planner JSON lives. Defaults to data.json in the data directory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Hours of sleep used by the daily routine
    #[serde(default = "default_sleep_hours")]
    pub sleep_hours: f64,
    /// UI poll interval in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
}

fn default_sleep_hours() -> f64 {
    DEFAULT_SLEEP_HOURS
}

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

impl Default for OrganiserConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            sleep_hours: default_sleep_hours(),
            tick_ms: default_tick_ms(),
            pomodoro: PomodoroConfig::default(),
        }
    }
}

impl OrganiserConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("organiser")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validate_sleep_hours(self.sleep_hours)?;
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be greater than zero");
        }
        Ok(())
    }

    /// Resolved path of the planner document
    pub fn data_file_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => data_file(),
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
