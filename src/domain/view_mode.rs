use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// How the calendar was opened. Admin view has full read/write; worker
/// view is strictly read-only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "worker")]
    Worker,
}

impl ViewMode {
    pub fn can_edit(&self) -> bool {
        matches!(self, ViewMode::Admin)
    }
}

impl FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ViewMode::Admin),
            "worker" => Ok(ViewMode::Worker),
            _ => Err(ValidationError::new(format!("Invalid view: {s:?}"))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ViewMode::Admin => "admin",
                ViewMode::Worker => "worker",
            }
        )
    }
}

#[test]
fn test_edit_rights() {
    assert!(ViewMode::Admin.can_edit());
    assert!(!ViewMode::Worker.can_edit());
}

#[test]
fn test_parse() {
    assert_eq!(ViewMode::from_str("worker").unwrap(), ViewMode::Worker);
    assert!(ViewMode::from_str("Admin").is_err());
}
