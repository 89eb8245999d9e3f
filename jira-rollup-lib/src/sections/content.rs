use crate::facts::{Component, StatusClass};
use crate::metrics::{AggregateCell, ComponentCell, ProjectedCells, Share};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{Display, EnumIter};

/// Opaque identifiers attached to rows and columns so consumers can cross-reference them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RowAttr {
    StatusId,
    AssigneeId,
    ParentId,
    SprintId,
    VersionId,
    ComponentId,
    BoardId,
}

pub type RowAttrs = BTreeMap<RowAttr, String>;

/// What a section holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum SectionContent {
    /// The section's population is empty.
    Empty,
    Project(ProjectTotals),
    CrossTab(CrossTab),
    Timeline(TimelineGrid),
    Breakdown(BreakdownGrid),
    Parents(ParentTable),
    Issues(IssueList),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCell {
    pub label: String,
    pub cell: AggregateCell,
}

/// Partition totals of the whole project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotals {
    pub rows: Vec<LabeledCell>,
    pub summary: AggregateCell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabRow {
    pub label: String,
    pub attrs: RowAttrs,
    pub cell: AggregateCell,
    pub components: Vec<ComponentCell>,
}

/// Rows of a dimension crossed with the component catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub components: Vec<Component>,
    pub rows: Vec<CrossTabRow>,
    pub summary: Option<CrossTabRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGridRow {
    pub label: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub closed: bool,
    pub attrs: RowAttrs,
    #[serde(flatten)]
    pub cells: ProjectedCells,
}

/// A projected version or sprint timeline crossed with the component catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineGrid {
    pub components: Vec<Component>,
    pub rows: Vec<TimelineGridRow>,
    pub summary: ProjectedCells,
}

/// Display fields of a single issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueLine {
    pub key: String,
    pub summary: String,
    pub issue_type: String,
    pub status: String,
    pub status_class: StatusClass,
    pub assignee: String,
    pub components: Vec<String>,
    pub estimate: f64,
    pub spent: f64,
    pub link: Option<String>,
    pub attrs: RowAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownColumn {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub attrs: RowAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownGridRow {
    #[serde(flatten)]
    pub line: IssueLine,
    pub shares: Vec<Option<Share>>,
}

/// The issues of one component against the columns of a dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownGrid {
    pub component: Component,
    pub columns: Vec<BreakdownColumn>,
    pub rows: Vec<BreakdownGridRow>,
    pub totals: Vec<Share>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentRow {
    pub key: String,
    pub summary: String,

    /// Only reported for stories.
    pub status: Option<String>,
    pub link: Option<String>,
    pub tasks: usize,
    pub qa: usize,
    pub completed: usize,
    pub estimate: f64,
    pub spent: f64,
    pub left: f64,
    pub attrs: RowAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentTable {
    pub rows: Vec<ParentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueList {
    pub rows: Vec<IssueLine>,
    pub total: AggregateCell,
}
