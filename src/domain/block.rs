use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    BlockId, BlockKind, CalendarMonth, Employee, GridColumn, GridRow,
    JobTitle, OutOfRangeError, TimeOfDay, ValidationError,
};

/// Which of the optional block rules are enforced. Time ordering and
/// overlap rejection are policy, not hard invariants: some managers
/// schedule overnight shifts or double-book lanes on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub require_ordered_times: bool,
    pub reject_overlaps: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_ordered_times: true,
            reject_overlaps: false,
        }
    }
}

/// One scheduled interval for one worker: a date range, an optional
/// time range, and the grid lane it renders in. Blocks are value
/// objects; every mutation returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: Option<TimeOfDay>,
    #[serde(rename = "endTime")]
    pub end_time: Option<TimeOfDay>,
    pub row: GridRow,
    pub employee: Employee,
    #[serde(rename = "jobTitle")]
    pub job_title: JobTitle,
}

impl ScheduleBlock {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: BlockKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
        start_time: Option<TimeOfDay>,
        end_time: Option<TimeOfDay>,
        row: GridRow,
        employee: Employee,
        job_title: JobTitle,
        policy: &ValidationPolicy,
    ) -> Result<Self, ValidationError> {
        let block = Self {
            id: BlockId::default(),
            kind,
            start_date,
            end_date,
            start_time,
            end_time,
            row,
            employee,
            job_title,
        };
        block.validate(policy)?;
        Ok(block)
    }

    pub fn validate(
        &self,
        policy: &ValidationPolicy,
    ) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::new(
                "Start date must not be after end date".to_string(),
            ));
        }

        match (self.kind.requires_times(), &self.start_time, &self.end_time)
        {
            (true, Some(start), Some(end)) => {
                if start == end {
                    return Err(ValidationError::new(
                        "Start and end time must differ".to_string(),
                    ));
                }
                if policy.require_ordered_times && end.is_before(start) {
                    return Err(ValidationError::new(
                        "Start time must be before end time".to_string(),
                    ));
                }
            }
            (true, _, _) => {
                return Err(ValidationError::new(format!(
                    "{} requires a start and end time",
                    self.kind
                )));
            }
            (false, None, None) => {}
            (false, _, _) => {
                return Err(ValidationError::new(format!(
                    "{} does not take times",
                    self.kind
                )));
            }
        }

        Ok(())
    }

    /// Inclusive length of the date range in days.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// The month this block's view is anchored to.
    pub fn month(&self) -> CalendarMonth {
        CalendarMonth::of(self.start_date)
    }

    pub fn start_column(&self) -> GridColumn {
        GridColumn::parse(self.start_date.day0() as i16)
            .expect("Day of month always fits the 31-column view")
    }

    /// Whether the block runs past the last column of its starting
    /// month's view.
    pub fn continues_past_month(&self) -> bool {
        self.end_date > self.month().last_day()
    }

    /// Re-anchors the block at a new lane and column, preserving its
    /// span. The month stays the one the block started in; a column
    /// past that month's last day is out of range.
    pub fn moved_to(
        &self,
        row: GridRow,
        column: GridColumn,
    ) -> Result<Self, OutOfRangeError> {
        let month = self.month();
        let start_date =
            month.day(column.day_of_month()).ok_or_else(|| {
                OutOfRangeError::new(format!(
                    "Column {} has no day in {}",
                    column.value_of(),
                    month
                ))
            })?;
        let end_date = start_date + Duration::days(self.span_days() - 1);

        Ok(Self {
            row,
            start_date,
            end_date,
            ..self.clone()
        })
    }

    /// Replaces the date range after an explicit edit.
    pub fn with_dates(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if start_date > end_date {
            return Err(ValidationError::new(
                "Start date must not be after end date".to_string(),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
            ..self.clone()
        })
    }

    /// Two blocks collide when they share a lane and their date ranges
    /// intersect.
    pub fn overlaps(&self, other: &ScheduleBlock) -> bool {
        self.row == other.row
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }
}
