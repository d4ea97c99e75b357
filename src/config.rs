use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected 7 weekday names, got {0}")]
    WeekdayNames(usize),
}

/// Presentation-independent settings for the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// First day of the week used by the week axis.
    pub week_start: Weekday,
    /// Weekday labels, Monday first, as resolved by the localization layer.
    pub weekday_names: Vec<String>,
    /// Reject malformed time strings when loading snapshots instead of reading them as midnight.
    pub strict_times: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            weekday_names: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strict_times: false,
        }
    }
}

impl TimelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: TimelineConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        self.validate()?;
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weekday_names.len() != 7 {
            return Err(ConfigError::WeekdayNames(self.weekday_names.len()));
        }
        Ok(())
    }

    pub fn weekday_name(&self, weekday: Weekday) -> String {
        self.weekday_names
            .get(weekday.num_days_from_monday() as usize)
            .cloned()
            .unwrap_or_else(|| weekday.to_string())
    }

    /// Days elapsed between the configured week start and `weekday` (0..=6).
    pub fn week_offset(&self, weekday: Weekday) -> u32 {
        let start = self.week_start.num_days_from_monday();
        (weekday.num_days_from_monday() + 7 - start) % 7
    }
}
