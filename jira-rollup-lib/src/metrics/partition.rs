use crate::facts::Issue;
use serde::Serialize;
use strum::{Display, EnumIter};

/// The mutually exclusive classification of an issue.
///
/// Backlog status takes precedence, so an issue parked in the backlog is never counted as versioned
/// even when it carries a fix version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionKind {
    Versioned,
    Unversioned,
    Backlog,
}

impl PartitionKind {
    #[must_use]
    pub fn of(issue: &Issue) -> Self {
        if issue.is_backlog() {
            Self::Backlog
        } else if issue.has_active_version() {
            Self::Versioned
        } else {
            Self::Unversioned
        }
    }
}

/// Read-only views over an issue list.
#[derive(Debug, Clone, Default)]
pub struct Partitions<'a> {
    /// Ordered by release date of the first active version (undated first), then id.
    pub versioned: Vec<&'a Issue>,

    /// Ordered by id.
    pub unversioned: Vec<&'a Issue>,

    /// Ordered by id.
    pub backlog: Vec<&'a Issue>,

    /// Issues with a sprint assignment, ordered by sprint sort key, then id.
    pub sprinted: Vec<&'a Issue>,
}

impl<'a> Partitions<'a> {
    #[must_use]
    pub fn get(&self, kind: PartitionKind) -> &[&'a Issue] {
        match kind {
            PartitionKind::Versioned => &self.versioned,
            PartitionKind::Unversioned => &self.unversioned,
            PartitionKind::Backlog => &self.backlog,
        }
    }
}

/// Classifies and orders issues.
#[must_use]
pub fn partition(issues: &[Issue]) -> Partitions<'_> {
    let mut partitions = Partitions::default();

    for issue in issues {
        match PartitionKind::of(issue) {
            PartitionKind::Versioned => partitions.versioned.push(issue),
            PartitionKind::Unversioned => partitions.unversioned.push(issue),
            PartitionKind::Backlog => partitions.backlog.push(issue),
        }

        if issue.sprint.is_some() {
            partitions.sprinted.push(issue);
        }
    }

    // None sorts before Some, which places undated releases first.
    partitions
        .versioned
        .sort_by(|a, b| a.release_date().cmp(&b.release_date()).then_with(|| a.id.cmp(&b.id)));
    partitions.unversioned.sort_by(|a, b| a.id.cmp(&b.id));
    partitions.backlog.sort_by(|a, b| a.id.cmp(&b.id));
    partitions.sprinted.sort_by(|a, b| {
        let a_key = a.sprint.map(|s| s.sort_key);
        let b_key = b.sprint.map(|s| s.sort_key);
        a_key.cmp(&b_key).then_with(|| a.id.cmp(&b.id))
    });

    partitions
}
