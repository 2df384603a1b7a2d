use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CalendarMonth, JobTitle, ManagerId, ScheduleBlock};

/// The (manager, job title, month) triple that bounds which blocks are
/// loaded and displayed at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleScope {
    #[serde(rename = "managerId")]
    pub manager_id: ManagerId,
    #[serde(rename = "jobTitle")]
    pub job_title: JobTitle,
    pub month: CalendarMonth,
}

impl ScheduleScope {
    pub fn new(
        manager_id: ManagerId,
        job_title: JobTitle,
        month: CalendarMonth,
    ) -> Self {
        Self {
            manager_id,
            job_title,
            month,
        }
    }

    /// Whether a persisted block belongs in this view: same job title,
    /// starting inside the anchored month.
    pub fn admits(&self, block: &ScheduleBlock) -> bool {
        block.job_title == self.job_title
            && self.month.contains(block.start_date)
    }
}

impl fmt::Display for ScheduleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.manager_id.as_ref(), self.job_title, self.month)
    }
}
