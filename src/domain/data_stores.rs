use chrono::{DateTime, NaiveDate, SecondsFormat};
use color_eyre::eyre::Report;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{
    BlockId, BlockKind, Employee, GridRow, JobTitle, ManagerId,
    ScheduleBlock, TimeOfDay, ValidationError,
};

/// A schedule block as the persistence collaborator stores it: dates
/// as ISO-8601 date-time strings, times as `HH:mm`, everything else
/// flat. Parsing back into the domain happens here, at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub row: i16,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
}

impl BlockRecord {
    pub fn from_block(block: &ScheduleBlock) -> Self {
        Self {
            id: *block.id.as_ref(),
            kind: block.kind.to_string(),
            start_date: format_record_date(block.start_date),
            end_date: format_record_date(block.end_date),
            start_time: block.start_time.map(|t| t.to_string()),
            end_time: block.end_time.map(|t| t.to_string()),
            first_name: block.employee.first_name.to_string(),
            last_name: block.employee.last_name.to_string(),
            photo_url: block.employee.photo_url.clone(),
            row: block.row.value_of(),
            job_title: block.job_title.to_string(),
        }
    }

    pub fn into_block(self) -> Result<ScheduleBlock, ValidationError> {
        let start_time =
            self.start_time.as_deref().map(TimeOfDay::parse).transpose()?;
        let end_time =
            self.end_time.as_deref().map(TimeOfDay::parse).transpose()?;

        Ok(ScheduleBlock {
            id: BlockId::new(self.id),
            kind: self.kind.parse::<BlockKind>()?,
            start_date: parse_record_date(&self.start_date)?,
            end_date: parse_record_date(&self.end_date)?,
            start_time,
            end_time,
            row: GridRow::parse(self.row)?,
            employee: Employee::parse(
                self.first_name,
                self.last_name,
                self.photo_url,
            )?,
            job_title: JobTitle::parse(self.job_title)?,
        })
    }
}

fn format_record_date(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .expect("Midnight exists on every date")
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn parse_record_date(value: &str) -> Result<NaiveDate, ValidationError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        ValidationError::new(format!("Invalid record date {value:?}: {e}"))
    })
}

/// The persistence collaborator. Records are addressed by the block's
/// own id, so an update or delete never scans the collection.
#[async_trait::async_trait]
pub trait BlockStore {
    async fn list_blocks(
        &self,
        manager_id: &ManagerId,
    ) -> Result<Vec<BlockRecord>, BlockStoreError>;
    async fn create_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError>;
    /// Update-or-insert keyed by the record's id.
    async fn update_block(
        &mut self,
        manager_id: &ManagerId,
        record: BlockRecord,
    ) -> Result<(), BlockStoreError>;
    /// Deleting an id that is already gone succeeds.
    async fn delete_block(
        &mut self,
        manager_id: &ManagerId,
        id: &BlockId,
    ) -> Result<(), BlockStoreError>;
    async fn delete_all_blocks(
        &mut self,
        manager_id: &ManagerId,
    ) -> Result<(), BlockStoreError>;
}

#[derive(Debug, Error)]
pub enum BlockStoreError {
    #[error("Block ID already exists")]
    BlockIdExists,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BlockStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BlockIdExists, Self::BlockIdExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
