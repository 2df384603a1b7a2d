use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

/// Cadence of the date-transition animation: one day of travel per
/// 50 ms of wall time.
pub const STEP_PER_DAY: Duration = Duration::from_millis(50);

/// A block sliding from one date to another after an explicit date
/// edit. The animation is a pure description: callers sample it
/// against their own clock from a single frame callback, and cancel it
/// by dropping it. No timer, no drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateAnimation {
    #[serde(rename = "fromDate")]
    from: NaiveDate,
    #[serde(rename = "toDate")]
    to: NaiveDate,
}

impl DateAnimation {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    fn day_distance(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    pub fn duration(&self) -> Duration {
        STEP_PER_DAY * self.day_distance().unsigned_abs() as u32
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration()
    }

    /// The date shown `elapsed` into the animation, stepping one day
    /// per cadence interval and clamping at the destination.
    pub fn sample(&self, elapsed: Duration) -> NaiveDate {
        let distance = self.day_distance();
        if distance == 0 {
            return self.to;
        }
        let steps = (elapsed.as_millis() / STEP_PER_DAY.as_millis())
            .min(distance.unsigned_abs() as u128)
            as i64;
        self.from + chrono::Duration::days(steps * distance.signum())
    }
}
