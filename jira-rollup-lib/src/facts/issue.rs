use super::{Component, StatusClass, Version};
use chrono::{DateTime, NaiveDate, Utc};
use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};

/// Tracker identity of an issue.
///
/// Identities order lexicographically, which is the tie-break order used throughout the reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IssueId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for IssueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub name: String,
}

impl Status {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn class(&self) -> StatusClass {
        StatusClass::of(&self.name)
    }
}

/// The person an issue is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub account_id: String,
    pub display_name: String,
}

impl Assignee {
    #[must_use]
    pub fn new(account_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Kind of tracker issue. Only epics and stories matter for parent rollups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum IssueType {
    Epic,
    Story,
    #[default]
    Task,
    Other(String),
}

impl IssueType {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Epic" => Self::Epic,
            "Story" => Self::Story,
            "Task" => Self::Task,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Epic => "Epic",
            Self::Story => "Story",
            Self::Task => "Task",
            Self::Other(name) => name,
        }
    }
}

/// Membership of an issue in one sprint of one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintAssignment {
    pub board_id: u64,
    pub sprint_id: u64,

    /// The sprint's chronological sort key.
    pub sort_key: DateTime<Utc>,
}

/// A normalized issue.
///
/// Estimates are in hours and never negative. `ratio` is `spent / estimate` rounded to two
/// decimals, or 0 when either side is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub id: IssueId,
    pub key: String,
    pub summary: String,
    pub status: Status,
    pub assignee: Option<Assignee>,
    pub components: Vec<Component>,
    pub estimate: f64,
    pub spent: f64,
    pub ratio: f64,
    pub versions: Vec<Version>,
    pub issue_type: IssueType,
    pub parent: Option<IssueId>,
    pub sprint: Option<SprintAssignment>,
    pub link: Option<String>,
}

impl Issue {
    /// Creates an issue with no effort, no tags, and no container memberships.
    #[must_use]
    pub fn new(id: impl Into<String>, key: impl Into<String>, status: Status) -> Self {
        Self {
            id: IssueId::new(id),
            key: key.into(),
            summary: String::new(),
            status,
            assignee: None,
            components: Vec::new(),
            estimate: 0.0,
            spent: 0.0,
            ratio: 0.0,
            versions: Vec::new(),
            issue_type: IssueType::default(),
            parent: None,
            sprint: None,
            link: None,
        }
    }

    #[must_use]
    pub fn status_class(&self) -> StatusClass {
        self.status.class()
    }

    #[must_use]
    pub fn is_backlog(&self) -> bool {
        self.status_class() == StatusClass::Backlog
    }

    pub fn active_versions(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter().filter(|v| v.is_active())
    }

    #[must_use]
    pub fn has_active_version(&self) -> bool {
        self.active_versions().next().is_some()
    }

    /// Release date of the first active version, used to order the versioned partition.
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.active_versions().next().and_then(|v| v.release_date)
    }

    #[must_use]
    pub fn has_component(&self, component_id: &str) -> bool {
        self.components.iter().any(|c| c.id == component_id)
    }

    #[must_use]
    pub fn assignee_id(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.account_id.as_str())
    }
}
