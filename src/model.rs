use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, ClockTimeError, Interval};

/// A break inside a shift. Times are time-of-day strings as supplied by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub id: String,
    pub name: String,
    pub start_hour: String,
    pub end_hour: String,
}

impl Break {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_hour: impl Into<String>,
        end_hour: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_hour: start_hour.into(),
            end_hour: end_hour.into(),
        }
    }

    pub fn interval(&self) -> Interval {
        lenient_interval(&self.start_hour, &self.end_hour)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub start_hour: String,
    pub end_hour: String,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl Shift {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_hour: impl Into<String>,
        end_hour: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_hour: start_hour.into(),
            end_hour: end_hour.into(),
            breaks: Vec::new(),
        }
    }

    pub fn with_break(mut self, brk: Break) -> Self {
        self.breaks.push(brk);
        self
    }

    pub fn interval(&self) -> Interval {
        lenient_interval(&self.start_hour, &self.end_hour)
    }

    /// Checks every time string of the shift and its breaks with the strict parser.
    pub fn validate_times(&self) -> Result<(), ClockTimeError> {
        ClockTime::parse_strict(&self.start_hour)?;
        ClockTime::parse_strict(&self.end_hour)?;
        for brk in &self.breaks {
            ClockTime::parse_strict(&brk.start_hour)?;
            ClockTime::parse_strict(&brk.end_hour)?;
        }
        Ok(())
    }
}

fn lenient_interval(start: &str, end: &str) -> Interval {
    Interval::new(ClockTime::parse_lenient(start), ClockTime::parse_lenient(end))
}

/// Weekly shift pattern of a resource. A `None` day has no shift assigned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default)]
    pub monday: Option<Shift>,
    #[serde(default)]
    pub tuesday: Option<Shift>,
    #[serde(default)]
    pub wednesday: Option<Shift>,
    #[serde(default)]
    pub thursday: Option<Shift>,
    #[serde(default)]
    pub friday: Option<Shift>,
    #[serde(default)]
    pub saturday: Option<Shift>,
    #[serde(default)]
    pub sunday: Option<Shift>,
}

impl WeeklySchedule {
    pub fn shift_for(&self, weekday: Weekday) -> Option<&Shift> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, weekday: Weekday) -> &mut Option<Shift> {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    pub fn set(&mut self, weekday: Weekday, shift: Option<Shift>) {
        *self.slot_mut(weekday) = shift;
    }

    pub fn with(mut self, weekday: Weekday, shift: Shift) -> Self {
        self.set(weekday, Some(shift));
        self
    }

    pub fn assigned_days(&self) -> impl Iterator<Item = (Weekday, &Shift)> {
        WEEK_KEYS
            .iter()
            .filter_map(|(day, _)| self.shift_for(*day).map(|shift| (*day, shift)))
    }
}

/// Weekday keys used by the snapshot formats, Monday first.
pub const WEEK_KEYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "monday"),
    (Weekday::Tue, "tuesday"),
    (Weekday::Wed, "wednesday"),
    (Weekday::Thu, "thursday"),
    (Weekday::Fri, "friday"),
    (Weekday::Sat, "saturday"),
    (Weekday::Sun, "sunday"),
];

pub fn weekday_from_key(key: &str) -> Option<Weekday> {
    let key = key.trim().to_ascii_lowercase();
    WEEK_KEYS
        .iter()
        .find(|(_, name)| *name == key || name[..3] == key)
        .map(|(day, _)| *day)
}

/// A schedulable resource (person, line, machine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<WeeklySchedule>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            schedule: None,
        }
    }

    pub fn with_schedule(mut self, schedule: WeeklySchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn shift_on(&self, weekday: Weekday) -> Option<&Shift> {
        self.schedule.as_ref().and_then(|s| s.shift_for(weekday))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_keys_accept_short_and_long_forms() {
        assert_eq!(weekday_from_key("Monday"), Some(Weekday::Mon));
        assert_eq!(weekday_from_key("sun"), Some(Weekday::Sun));
        assert_eq!(weekday_from_key("funday"), None);
    }

    #[test]
    fn resource_without_schedule_has_no_shifts() {
        let resource = Resource::new("r1", "Press 1");
        assert!(resource.shift_on(Weekday::Mon).is_none());
    }
}
