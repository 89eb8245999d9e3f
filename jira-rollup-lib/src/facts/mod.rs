//! Loading and normalization of tracker data.
//!
//! A [`Snapshot`] is the tracker export as found on disk. [`Dataset::from_snapshot`] turns it into
//! canonical [`Issue`] values plus the version, board, and component catalogs that everything
//! downstream works from.

mod component;
mod dataset;
mod issue;
mod normalize;
mod snapshot;
mod sprint;
mod status_class;
mod version;

pub use component::Component;
pub use dataset::Dataset;
pub use issue::{Assignee, Issue, IssueId, IssueType, SprintAssignment, Status};
pub use normalize::normalize_issue;
pub use snapshot::{RawFields, RawIssue, RawIssueType, RawParent, Snapshot, SprintIssue};
pub use sprint::{Board, Sprint, SprintState};
pub use status_class::{
    BACKLOG_STATUS, COMPLETED_STATUSES, NOT_FINISHED_STATUSES, QA_STATUSES, StatusClass, not_finished_rank,
};
pub use version::Version;
