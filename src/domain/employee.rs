use serde::{Deserialize, Serialize};

use super::{ValidationError, WorkerName};

/// Snapshot of the assigned worker taken when the block is created.
/// Not a live reference: later profile edits do not propagate here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "firstName")]
    pub first_name: WorkerName,
    #[serde(rename = "lastName")]
    pub last_name: WorkerName,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

impl Employee {
    pub fn new(
        first_name: WorkerName,
        last_name: WorkerName,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            photo_url,
        }
    }

    pub fn parse(
        first_name: String,
        last_name: String,
        photo_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: WorkerName::parse(first_name)?,
            last_name: WorkerName::parse(last_name)?,
            photo_url,
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[test]
fn test_display_name() {
    let employee =
        Employee::parse("Jane".to_string(), "Doe".to_string(), None)
            .expect("Failed to parse employee");
    assert_eq!(employee.display_name(), "Jane Doe");
}
