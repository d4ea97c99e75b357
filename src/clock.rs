use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const HOURS_PER_DAY: f64 = 24.0;

/// A time of day expressed in fractional hours.
///
/// Parsed values live in `[0, 24)`; effective interval ends may extend past 24 when an
/// interval crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(f64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockTimeError {
    #[error("time '{0}' has no ':' separator")]
    MissingSeparator(String),
    #[error("time '{input}' has a non-numeric {component} component")]
    NonNumeric {
        input: String,
        component: &'static str,
    },
    #[error("time '{input}' has {component} out of range")]
    OutOfRange {
        input: String,
        component: &'static str,
    },
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0.0);

    pub fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    pub fn hours(self) -> f64 {
        self.0
    }

    /// Lenient `HH:MM[:SS[.fff]]` parser.
    ///
    /// Text without a colon resolves to midnight and non-numeric components count as zero.
    /// This never fails; callers that need validation use [`ClockTime::parse_strict`].
    pub fn parse_lenient(text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.contains(':') {
            debug!("time '{trimmed}' has no ':' separator; treating as midnight");
            return Self::MIDNIGHT;
        }

        let mut parts = trimmed.split(':');
        let hours = lenient_component(parts.next());
        let minutes = lenient_component(parts.next());
        let seconds = lenient_component(parts.next());
        Self(hours + minutes / 60.0 + seconds / 3600.0)
    }

    /// Strict `HH:MM[:SS[.fff]]` parser used when a snapshot opts into validation.
    pub fn parse_strict(text: &str) -> Result<Self, ClockTimeError> {
        let trimmed = text.trim();
        if !trimmed.contains(':') {
            return Err(ClockTimeError::MissingSeparator(trimmed.to_string()));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > 3 {
            return Err(ClockTimeError::NonNumeric {
                input: trimmed.to_string(),
                component: "trailing",
            });
        }

        let hours = strict_component(trimmed, parts[0], "hour")?;
        let minutes = strict_component(trimmed, parts[1], "minute")?;
        let seconds = match parts.get(2) {
            Some(part) => strict_component(trimmed, part, "second")?,
            None => 0.0,
        };

        if hours.fract() != 0.0 || !(0.0..HOURS_PER_DAY).contains(&hours) {
            return Err(out_of_range(trimmed, "hour"));
        }
        if minutes.fract() != 0.0 || !(0.0..60.0).contains(&minutes) {
            return Err(out_of_range(trimmed, "minute"));
        }
        if !(0.0..60.0).contains(&seconds) {
            return Err(out_of_range(trimmed, "second"));
        }

        Ok(Self(hours + minutes / 60.0 + seconds / 3600.0))
    }
}

fn lenient_component(part: Option<&str>) -> f64 {
    part.and_then(|p| p.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn strict_component(input: &str, part: &str, component: &'static str) -> Result<f64, ClockTimeError> {
    let part = part.trim();
    let all_digits = !part.is_empty() && part.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !all_digits {
        return Err(ClockTimeError::NonNumeric {
            input: input.to_string(),
            component,
        });
    }
    part.parse::<f64>().map_err(|_| ClockTimeError::NonNumeric {
        input: input.to_string(),
        component,
    })
}

fn out_of_range(input: &str, component: &'static str) -> ClockTimeError {
    ClockTimeError::OutOfRange {
        input: input.to_string(),
        component,
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_minutes = (self.0 * 60.0).round() as i64;
        write!(f, "{:02}:{:02}", total_minutes / 60, total_minutes % 60)
    }
}

/// A time-of-day span. An end earlier than the start wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Interval {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn from_hours(start: f64, end: f64) -> Self {
        Self::new(ClockTime::from_hours(start), ClockTime::from_hours(end))
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parses_seconds_and_fraction() {
        let t = ClockTime::parse_lenient("08:30:36.000");
        assert!((t.hours() - 8.51).abs() < 1e-9);
    }

    #[test]
    fn lenient_without_colon_is_midnight() {
        assert_eq!(ClockTime::parse_lenient("0830"), ClockTime::MIDNIGHT);
        assert_eq!(ClockTime::parse_lenient(""), ClockTime::MIDNIGHT);
    }

    #[test]
    fn strict_rejects_bad_minutes() {
        let err = ClockTime::parse_strict("08:75").unwrap_err();
        assert!(matches!(err, ClockTimeError::OutOfRange { component: "minute", .. }));
    }

    #[test]
    fn display_rounds_to_minutes() {
        assert_eq!(ClockTime::from_hours(12.5).to_string(), "12:30");
    }
}
