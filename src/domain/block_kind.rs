use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The closed set of block types a schedule knows. Wire names match the
/// persisted records and the spreadsheet interchange column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "Full Day Block")]
    FullDay,
    #[serde(rename = "Off Day Block")]
    OffDay,
    #[serde(rename = "Vacation Block")]
    Vacation,
}

impl BlockKind {
    /// Vacation blocks carry no start/end times; the other kinds
    /// require both.
    pub fn requires_times(&self) -> bool {
        !matches!(self, BlockKind::Vacation)
    }
}

impl FromStr for BlockKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full Day Block" => Ok(BlockKind::FullDay),
            "Off Day Block" => Ok(BlockKind::OffDay),
            "Vacation Block" => Ok(BlockKind::Vacation),
            _ => Err(ValidationError::new(format!(
                "Invalid block type: {s:?}"
            ))),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BlockKind::FullDay => "Full Day Block",
                BlockKind::OffDay => "Off Day Block",
                BlockKind::Vacation => "Vacation Block",
            }
        )
    }
}
