use serde::Serialize;
use strum::{Display, EnumIter};

/// Status names counted as work that has not finished yet.
pub const NOT_FINISHED_STATUSES: &[&str] = &["In Progress", "Ready for Development"];

/// Status names counted as being under test or review.
pub const QA_STATUSES: &[&str] = &["In QA", "Code Review"];

/// Status names counted as done.
pub const COMPLETED_STATUSES: &[&str] = &["Client Review", "Completed", "Verified", "TM/PM Verify"];

/// Status name of issues parked in the backlog.
pub const BACKLOG_STATUS: &str = "Backlog";

/// Fixed classification of tracker status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatusClass {
    Completed,
    Qa,
    NotFinished,
    Backlog,
    Other,
}

impl StatusClass {
    #[must_use]
    pub fn of(status_name: &str) -> Self {
        if COMPLETED_STATUSES.contains(&status_name) {
            Self::Completed
        } else if QA_STATUSES.contains(&status_name) {
            Self::Qa
        } else if NOT_FINISHED_STATUSES.contains(&status_name) {
            Self::NotFinished
        } else if status_name == BACKLOG_STATUS {
            Self::Backlog
        } else {
            Self::Other
        }
    }
}

/// Position of a status name within the fixed "not finished" list, used to order status rows.
#[must_use]
pub fn not_finished_rank(status_name: &str) -> Option<usize> {
    NOT_FINISHED_STATUSES.iter().position(|&name| name == status_name)
}
