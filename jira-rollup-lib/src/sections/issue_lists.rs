use super::{IssueList, Section, SectionContent, SectionKind, issue_line};
use crate::facts::Issue;
use crate::metrics::{Partitions, aggregate};

pub fn build_unversioned(partitions: &Partitions<'_>) -> Section {
    build(&partitions.unversioned, SectionKind::Unversioned, "Unversioned")
}

pub fn build_backlog(partitions: &Partitions<'_>) -> Section {
    build(&partitions.backlog, SectionKind::Backlog, "Backlog")
}

fn build(issues: &[&Issue], kind: SectionKind, title: &str) -> Section {
    if issues.is_empty() {
        return Section::empty(kind, title);
    }

    Section::new(
        kind,
        title,
        SectionContent::Issues(IssueList {
            rows: issues.iter().map(|issue| issue_line(issue)).collect(),
            total: aggregate(issues),
        }),
    )
}
