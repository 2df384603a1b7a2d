use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ValidationError;

/// A wall-clock time carried by shift and off-day blocks. Stored and
/// transported as `HH:mm`; shown to people as `h:mm a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay(NaiveTime);

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        TimeOfDay::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl TimeOfDay {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let parsed =
            NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
                ValidationError::new(format!(
                    "Invalid time of day {value:?}: {e}"
                ))
            })?;
        Ok(Self(parsed))
    }

    /// Accepts the human-facing `h:mm a` form used by the interchange
    /// format, e.g. `9:00 AM`.
    pub fn parse_twelve_hour(value: &str) -> Result<Self, ValidationError> {
        let parsed =
            NaiveTime::parse_from_str(value, "%I:%M %p").map_err(|e| {
                ValidationError::new(format!(
                    "Invalid time of day {value:?}: {e}"
                ))
            })?;
        Ok(Self(parsed))
    }

    pub fn twelve_hour(&self) -> String {
        self.0.format("%-I:%M %p").to_string()
    }

    pub fn is_after(&self, other: &TimeOfDay) -> bool {
        self.0 > other.0
    }

    pub fn is_before(&self, other: &TimeOfDay) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}
