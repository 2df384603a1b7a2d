use chrono::NaiveDate;
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use super::{
    BlockKind, CalendarMonth, Employee, GridRow, ImportFormatError,
    JobTitle, ScheduleBlock, TimeOfDay, ValidationError,
    ValidationPolicy,
};

/// Every column a schedule sheet must carry. A sheet missing any of
/// these rejects as a whole; there is no partial import.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "DisplayRow",
    "ProfilePicture",
    "FirstName",
    "LastName",
    "BlockType",
    "StartTime",
    "EndTime",
    "StartDate",
    "EndDate",
    "GridRow",
];

/// Placeholder for times on vacation rows.
pub const NOT_APPLICABLE: &str = "Not Applicable";
/// Placeholder for workers without a profile picture.
pub const NO_PICTURE: &str = "None";

const SHEET_DATE_FORMAT: &str = "%B %-d, %Y";

/// One spreadsheet row of the interchange format. Dates are
/// `MMMM d, yyyy`, times `h:mm a`, rows 1-based for human eyes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "DisplayRow")]
    pub display_row: i16,
    #[serde(rename = "ProfilePicture")]
    pub profile_picture: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "BlockType")]
    pub block_type: String,
    #[serde(rename = "StartTime")]
    pub start_time: String,
    #[serde(rename = "EndTime")]
    pub end_time: String,
    #[serde(rename = "StartDate")]
    pub start_date: String,
    #[serde(rename = "EndDate")]
    pub end_date: String,
    #[serde(rename = "GridRow")]
    pub grid_row: i16,
}

impl ScheduleRow {
    pub fn from_block(block: &ScheduleBlock) -> Self {
        let time = |time: &Option<TimeOfDay>| {
            time.map(|t| t.twelve_hour())
                .unwrap_or_else(|| NOT_APPLICABLE.to_string())
        };
        Self {
            display_row: block.row.value_of() + 1,
            profile_picture: block
                .employee
                .photo_url
                .clone()
                .unwrap_or_else(|| NO_PICTURE.to_string()),
            first_name: block.employee.first_name.to_string(),
            last_name: block.employee.last_name.to_string(),
            block_type: block.kind.to_string(),
            start_time: time(&block.start_time),
            end_time: time(&block.end_time),
            start_date: format_sheet_date(block.start_date),
            end_date: format_sheet_date(block.end_date),
            grid_row: block.row.value_of() + 1,
        }
    }

    /// Rebuilds a block under the importing scope's job title. The row
    /// gets a fresh id: imported ids are never trusted.
    pub fn into_block(
        self,
        job_title: &JobTitle,
        policy: &ValidationPolicy,
    ) -> Result<ScheduleBlock, ValidationError> {
        let kind: BlockKind = self.block_type.parse()?;
        let photo_url = match self.profile_picture.as_str() {
            NO_PICTURE | "" => None,
            url => Some(url.to_string()),
        };

        ScheduleBlock::new(
            kind,
            parse_sheet_date(&self.start_date)?,
            parse_sheet_date(&self.end_date)?,
            parse_sheet_time(&self.start_time)?,
            parse_sheet_time(&self.end_time)?,
            GridRow::parse(self.grid_row - 1)?,
            Employee::parse(self.first_name, self.last_name, photo_url)?,
            job_title.clone(),
            policy,
        )
    }
}

fn format_sheet_date(date: NaiveDate) -> String {
    date.format(SHEET_DATE_FORMAT).to_string()
}

fn parse_sheet_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%B %d, %Y").map_err(|e| {
        ValidationError::new(format!("Invalid sheet date {value:?}: {e}"))
    })
}

fn parse_sheet_time(
    value: &str,
) -> Result<Option<TimeOfDay>, ValidationError> {
    match value {
        NOT_APPLICABLE | "" => Ok(None),
        time => TimeOfDay::parse_twelve_hour(time).map(Some),
    }
}

/// Serializes rows to the CSV sheet handed to the browser.
pub fn write_sheet(rows: &[ScheduleRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Parses an uploaded sheet. The header row must carry every required
/// column and every data row must parse, or the whole sheet rejects.
pub fn read_sheet(data: &str) -> Result<Vec<ScheduleRow>, ImportFormatError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ImportFormatError::BadRow {
            row: 0,
            message: e.to_string(),
        })?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ImportFormatError::MissingColumn(
                column.to_string(),
            ));
        }
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<ScheduleRow>().enumerate() {
        let row = record.map_err(|e| ImportFormatError::BadRow {
            row: index + 1,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(ImportFormatError::Empty);
    }
    Ok(rows)
}

/// `{jobTitle}-{dd-MMMM-yyyy}-Schedule.csv`, stamped with the first
/// day of the exported month.
pub fn sheet_filename(job_title: &JobTitle, month: CalendarMonth) -> String {
    format!(
        "{}-{}-Schedule.csv",
        job_title,
        month.first_day().format("%d-%B-%Y")
    )
}
