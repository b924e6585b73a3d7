use chrono::{NaiveTime, Timelike};

use crate::TypeError;

const FORMAT: &str = "%H:%M";

/// A bookable time of day, rendered as zero-padded `HH:MM`.
///
/// Ordering follows the clock, so a sorted list of slots is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// Creates a slot at `hour:minute`.
    ///
    /// # Errors
    /// Returns [`TypeError::InvalidTimeSlot`] if `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TypeError> {
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimeSlot(format!("{hour}:{minute}")))
    }

    /// Builds a slot from minutes past midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self, TypeError> {
        minutes
            .checked_mul(60)
            .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0))
            .map(Self)
            .ok_or_else(|| TypeError::InvalidTimeSlot(format!("{minutes} minutes")))
    }

    /// Parses a strict `HH:MM` string (two digits each side).
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidTimeSlot(input.to_owned());
        let bytes = input.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }
        NaiveTime::parse_from_str(input, FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl From<TimeSlot> for NaiveTime {
    fn from(slot: TimeSlot) -> Self {
        slot.0
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TimeSlot::parse(&s).map_err(serde::de::Error::custom)
    }
}
