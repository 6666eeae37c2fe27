//! Launch countdown for the coming-soon page

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::WidgetError;

/// Element ids receiving the four counters, in display order
pub const UNIT_IDS: [&str; 4] = ["days", "hours", "minutes", "seconds"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn values(&self) -> [i64; 4] {
        [self.days, self.hours, self.minutes, self.seconds]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(Remaining),
    /// Target reached; show zeros and stop the timer
    Finished,
}

impl Tick {
    /// Text for each of [`UNIT_IDS`]
    pub fn texts(&self) -> [String; 4] {
        match self {
            Tick::Running(remaining) => remaining.values().map(|v| v.to_string()),
            Tick::Finished => std::array::from_fn(|_| "0".to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Tick::Finished)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Parse a `data-future-time` value
    ///
    /// Accepts RFC 3339; a value without an offset is taken as UTC.
    pub fn parse(value: &str) -> Result<Self, WidgetError> {
        let value = value.trim();
        if let Ok(target) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self::new(target.with_timezone(&Utc)));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| Self::new(naive.and_utc()))
            .ok_or_else(|| WidgetError::InvalidDate(value.to_string()))
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn tick(&self, now: DateTime<Utc>) -> Tick {
        let diff = (self.target - now).num_milliseconds();
        if diff <= 0 {
            return Tick::Finished;
        }

        let total_seconds = diff / 1000;
        Tick::Running(Remaining {
            days: total_seconds / 86_400,
            hours: (total_seconds / 3_600) % 24,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
        })
    }
}
