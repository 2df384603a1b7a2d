use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

lazy_static! {
    static ref NAME_RE: Regex =
        Regex::new(r"^[a-zA-Z\s]+$").expect("Invalid name regex");
}

/// A worker's first or last name as snapshotted onto a block.
/// Letters and spaces only; anything else never reaches the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerName(String);

impl WorkerName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::new(
                "Worker name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > 255 {
            return Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            ));
        }
        if !NAME_RE.is_match(&name) {
            return Err(ValidationError::new(
                "Worker name may only contain letters and spaces"
                    .to_string(),
            ));
        }
        Ok(Self(name))
    }
}

impl AsRef<String> for WorkerName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
