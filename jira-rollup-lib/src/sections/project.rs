use super::{LabeledCell, ProjectTotals, Section, SectionContent, SectionKind};
use crate::metrics::{PartitionKind, Partitions, aggregate};
use strum::IntoEnumIterator;

/// Versioned, unversioned, and backlog totals plus a summary over all three.
pub fn build(partitions: &Partitions<'_>) -> Section {
    let rows = PartitionKind::iter()
        .map(|kind| LabeledCell {
            label: kind.to_string(),
            cell: aggregate(partitions.get(kind)),
        })
        .collect();

    let everything: Vec<_> = PartitionKind::iter().flat_map(|kind| partitions.get(kind).iter().copied()).collect();

    Section::new(
        SectionKind::Project,
        "Project",
        SectionContent::Project(ProjectTotals {
            rows,
            summary: aggregate(&everything),
        }),
    )
}
