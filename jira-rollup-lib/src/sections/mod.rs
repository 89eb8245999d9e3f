//! Composition of the named report sections.
//!
//! [`build_report`] partitions a [`Dataset`] once and then computes each requested section on its
//! own. A section whose population is empty comes out as [`SectionContent::Empty`] and never
//! affects the others.

mod content;
mod in_progress;
mod issue_lists;
mod lines;
mod parents;
mod project;
mod sprints;
mod versions;

pub use content::{
    BreakdownColumn, BreakdownGrid, BreakdownGridRow, CrossTab, CrossTabRow, IssueLine, IssueList, LabeledCell, ParentRow,
    ParentTable, ProjectTotals, RowAttr, RowAttrs, SectionContent, TimelineGrid, TimelineGridRow,
};
pub use lines::{format_name, issue_attrs, issue_line};

use crate::facts::Dataset;
use crate::metrics::partition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

const LOG_TARGET: &str = "  sections";

/// The kinds of sections a report can contain, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SectionKind {
    Project,
    Statuses,
    Assignees,
    Versions,
    VersionBreakdowns,
    Sprints,
    Epics,
    Stories,
    Unversioned,
    Backlog,
}

/// A named, computed section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub content: SectionContent,
}

impl Section {
    #[must_use]
    pub fn new(kind: SectionKind, title: impl Into<String>, content: SectionContent) -> Self {
        Self {
            kind,
            title: title.into(),
            content,
        }
    }

    #[must_use]
    pub fn empty(kind: SectionKind, title: impl Into<String>) -> Self {
        Self::new(kind, title, SectionContent::Empty)
    }
}

/// The complete output of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub project: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }
}

/// Computes the requested sections of a report.
///
/// Sections always come out in [`SectionKind`] order, whatever the order of `kinds`.
#[must_use]
pub fn build_report(dataset: &Dataset, kinds: &[SectionKind]) -> Report {
    let partitions = partition(&dataset.issues);

    log::debug!(
        target: LOG_TARGET,
        "Partitioned {} issues: {} versioned, {} unversioned, {} backlog, {} sprinted",
        dataset.issues.len(),
        partitions.versioned.len(),
        partitions.unversioned.len(),
        partitions.backlog.len(),
        partitions.sprinted.len()
    );

    let mut sections = Vec::new();
    for kind in SectionKind::iter().filter(|kind| kinds.contains(kind)) {
        log::info!(target: LOG_TARGET, "Computing {kind} section");

        match kind {
            SectionKind::Project => sections.push(project::build(&partitions)),
            SectionKind::Statuses => sections.push(in_progress::build_statuses(&partitions, &dataset.components)),
            SectionKind::Assignees => {
                sections.push(in_progress::build_assignees(&dataset.issues, &partitions, &dataset.components));
            }
            SectionKind::Versions => {
                sections.push(versions::build_timeline(&partitions, &dataset.versions, &dataset.components));
            }
            SectionKind::VersionBreakdowns => {
                sections.extend(versions::build_breakdowns(&partitions, &dataset.versions, &dataset.components));
            }
            SectionKind::Sprints => sections.extend(sprints::build(&partitions, dataset)),
            SectionKind::Epics => sections.push(parents::build_epics(&dataset.issues)),
            SectionKind::Stories => sections.push(parents::build_stories(&dataset.issues)),
            SectionKind::Unversioned => sections.push(issue_lists::build_unversioned(&partitions)),
            SectionKind::Backlog => sections.push(issue_lists::build_backlog(&partitions)),
        }
    }

    Report {
        project: dataset.project.clone(),
        generated_at: dataset.now,
        sections,
    }
}
