use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const ROW_COUNT: i16 = 14;
pub const COLUMN_COUNT: i16 = 31;
pub const BAND_ROWS: i16 = 7;

/// A worker lane, 0..=13. Lanes 0..7 sit in the top band of the grid,
/// 7..14 in the bottom band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridRow(i16);

impl GridRow {
    pub fn parse(row: i16) -> Result<Self, ValidationError> {
        match row {
            r if r < 0 => Err(ValidationError::new(format!(
                "Grid row {r} is above the grid"
            ))),
            r if r >= ROW_COUNT => Err(ValidationError::new(format!(
                "Grid row {r} is below the grid"
            ))),
            r => Ok(Self(r)),
        }
    }

    pub fn value_of(&self) -> i16 {
        self.0
    }

    pub fn in_second_band(&self) -> bool {
        self.0 >= BAND_ROWS
    }
}

/// A day-of-month lane, 0..=30. Column 0 is the first of the month;
/// columns past the month's last day are rendered but inert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridColumn(i16);

impl GridColumn {
    pub fn parse(column: i16) -> Result<Self, ValidationError> {
        match column {
            c if c < 0 => Err(ValidationError::new(format!(
                "Grid column {c} is before the month"
            ))),
            c if c >= COLUMN_COUNT => Err(ValidationError::new(format!(
                "Grid column {c} is past the month view"
            ))),
            c => Ok(Self(c)),
        }
    }

    pub fn value_of(&self) -> i16 {
        self.0
    }

    /// The 1-based day of month this column shows.
    pub fn day_of_month(&self) -> u32 {
        (self.0 + 1) as u32
    }
}
