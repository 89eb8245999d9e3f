use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sprint state as reported by the tracker.
///
/// `active` and `future` sprints are both considered open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    #[serde(alias = "active", alias = "future")]
    Open,
    Closed,
}

/// An iteration container of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub state: SprintState,
}

impl Sprint {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, state: SprintState) -> Self {
        Self {
            id,
            name: name.into(),
            start_date: None,
            end_date: None,
            state,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == SprintState::Closed
    }

    /// Chronological sort key: end date, else start date, else `now`.
    ///
    /// Undated sprints are future sprints, so substituting the current time makes them sort last.
    #[must_use]
    pub fn sort_key(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end_date.or(self.start_date).unwrap_or(now)
    }
}

/// A board and the sprints it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sprints: Vec<Sprint>,
}
