use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A release container as exported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Version {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: None,
            release_date: None,
            released: false,
            archived: false,
        }
    }

    /// Whether the version still counts toward the versioned partition and the version timeline.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.archived
    }
}
