use chrono::{Datelike, NaiveDate};

use super::{CalendarMonth, GridColumn, GridRow, OutOfRangeError};

pub const DEFAULT_CELL_SIZE: u32 = 80;

/// Pure date↔column↔pixel mapping for the month grid. Every cell is a
/// `cell_size` square; the two row bands are separated by one empty
/// cell's height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    cell_size: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridGeometry {
    pub fn new(cell_size: u32) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// The column a date renders in, valid only for dates inside the
    /// anchored month.
    pub fn column_for_date(
        &self,
        date: NaiveDate,
        month: CalendarMonth,
    ) -> Result<GridColumn, OutOfRangeError> {
        if !month.contains(date) {
            return Err(OutOfRangeError::new(format!(
                "{date} is outside {month}"
            )));
        }
        GridColumn::parse(date.day0() as i16).map_err(|e| {
            OutOfRangeError::new(e.as_ref().to_owned())
        })
    }

    pub fn pixel_left(&self, column: GridColumn) -> u32 {
        column.value_of() as u32 * self.cell_size
    }

    /// The top edge of a lane, accounting for the separator cell
    /// between the two 7-row bands.
    pub fn pixel_top(&self, row: GridRow) -> u32 {
        let band_offset = if row.in_second_band() { 1 } else { 0 };
        (row.value_of() as u32 + band_offset) * self.cell_size
    }

    /// Rendered width of a date range, inclusive of both endpoints and
    /// clamped to the last column of the starting month's view.
    pub fn block_width(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> u32 {
        let month = CalendarMonth::of(start_date);
        let days_to_month_end =
            (month.last_day() - start_date).num_days() + 1;
        let days = (end_date - start_date).num_days() + 1;
        let clamped = days.clamp(1, days_to_month_end) as u32;
        clamped * self.cell_size
    }

    /// Midpoint marker x-offset for a selected date's column.
    pub fn marker_left(&self, column: GridColumn) -> u32 {
        self.pixel_left(column) + self.cell_size / 2
    }

    /// Total pixel height of the rendered grid: two bands plus the
    /// separator.
    pub fn grid_height(&self) -> u32 {
        (super::ROW_COUNT as u32 + 1) * self.cell_size
    }
}
