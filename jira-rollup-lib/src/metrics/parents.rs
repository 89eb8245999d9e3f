use super::{AggregateCell, aggregate, group_by};
use crate::facts::{Issue, IssueType, StatusClass};

/// Totals over the direct children of one parent issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentRollup<'a> {
    pub parent: &'a Issue,

    /// Child count and effort totals.
    pub children: AggregateCell,

    /// Children under test or review.
    pub qa: usize,

    /// Children that are done.
    pub completed: usize,
}

/// One rollup per issue of type `parent_type`, in input order.
///
/// Children are the issues whose parent reference names the parent's id. A parent without
/// children still gets a row with zero totals.
#[must_use]
pub fn parent_rollups<'a>(issues: &'a [Issue], parent_type: &IssueType) -> Vec<ParentRollup<'a>> {
    let parents: Vec<&Issue> = issues.iter().filter(|issue| issue.issue_type == *parent_type).collect();
    let parent_ids: Vec<_> = parents.iter().map(|parent| parent.id.clone()).collect();
    let all: Vec<&Issue> = issues.iter().collect();

    let groups = group_by(&all, &parent_ids, |issue| issue.parent.clone());

    parents
        .into_iter()
        .zip(groups)
        .map(|(parent, group)| {
            let count_class = |class: StatusClass| group.issues.iter().filter(|child| child.status_class() == class).count();

            ParentRollup {
                parent,
                children: aggregate(&group.issues),
                qa: count_class(StatusClass::Qa),
                completed: count_class(StatusClass::Completed),
            }
        })
        .collect()
}
