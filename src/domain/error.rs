use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleAPIError {
    #[error("Block not found: {0}")]
    BlockNotFound(uuid::Uuid),
    #[error("Import format error")]
    ImportFormatError(#[from] ImportFormatError),
    #[error("Out of range")]
    OutOfRange(#[from] OutOfRangeError),
    #[error("Schedule is read-only in worker view")]
    ReadOnlyMode,
    #[error("No schedule loaded")]
    ScopeNotLoaded,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

/// A grid coordinate or date that falls outside the rendered month view.
/// Callers on interactive paths treat this as a silent no-op.
#[derive(Debug, Error)]
#[error("Out of range: {0}")]
pub struct OutOfRangeError(String);

impl OutOfRangeError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum ImportFormatError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Row {row}: {message}")]
    BadRow { row: usize, message: String },
    #[error("Empty import")]
    Empty,
}
