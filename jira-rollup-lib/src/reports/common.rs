//! Tabular layout shared by the text and CSV emitters.

use crate::facts::StatusClass;
use crate::metrics::{AggregateCell, ComponentCell, ProjectedCells, Share};
use crate::sections::{
    BreakdownGrid, CrossTab, CrossTabRow, IssueLine, IssueList, ParentTable, ProjectTotals, SectionContent, TimelineGrid,
};
use chrono::NaiveDate;

/// Shown wherever a value is not defined.
pub const BLANK: &str = "-";

const CELL_HEADERS: [&str; 5] = ["Count", "Estimate", "Spent", "Left", "Overtime"];
const LINE_HEADERS: [&str; 5] = ["Key", "Summary", "Type", "Status", "Assignee"];

/// How an emitter should highlight a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Total,
    Overspent,
    Status(StatusClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub style: RowStyle,
}

impl TableRow {
    fn new(cells: Vec<String>, style: RowStyle) -> Self {
        Self { cells, style }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

pub fn format_hours(hours: f64) -> String {
    // negative zero
    let hours = if hours == 0.0 { 0.0 } else { hours };
    format!("{hours:.1}")
}

pub fn format_optional_hours(hours: Option<f64>) -> String {
    hours.map_or_else(|| BLANK.to_string(), format_hours)
}

pub fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| BLANK.to_string(), |r| format!("{r:.2}"))
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| BLANK.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Lays out a section's content as a table, or `None` for an empty section.
pub fn tabulate(content: &SectionContent) -> Option<Table> {
    match content {
        SectionContent::Empty => None,
        SectionContent::Project(totals) => Some(project_table(totals)),
        SectionContent::CrossTab(tab) => Some(cross_tab_table(tab)),
        SectionContent::Timeline(grid) => Some(timeline_table(grid)),
        SectionContent::Breakdown(grid) => Some(breakdown_table(grid)),
        SectionContent::Parents(table) => Some(parents_table(table)),
        SectionContent::Issues(list) => Some(issues_table(list)),
    }
}

fn headers<'a>(leading: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    leading.into_iter().map(str::to_string).collect()
}

fn cell_values(cell: &AggregateCell) -> impl Iterator<Item = String> {
    [
        cell.count.to_string(),
        format_hours(cell.estimate),
        format_hours(cell.spent),
        format_hours(cell.left),
        format_ratio(cell.overtime),
    ]
    .into_iter()
}

fn cell_style(cell: &AggregateCell) -> RowStyle {
    if cell.is_overspent() {
        RowStyle::Overspent
    } else {
        RowStyle::Plain
    }
}

fn project_table(totals: &ProjectTotals) -> Table {
    let mut rows: Vec<TableRow> = totals
        .rows
        .iter()
        .map(|row| {
            let cells = core::iter::once(row.label.clone()).chain(cell_values(&row.cell)).collect();
            TableRow::new(cells, cell_style(&row.cell))
        })
        .collect();

    let summary = core::iter::once("Summary".to_string()).chain(cell_values(&totals.summary)).collect();
    rows.push(TableRow::new(summary, RowStyle::Total));

    Table {
        headers: headers(core::iter::once("Partition").chain(CELL_HEADERS)),
        rows,
    }
}

const COMPONENT_CELL_HEADERS: [&str; 5] = ["Count", "Estimate", "Spent", "Left", "Overtime"];
const COMPONENT_PERIOD_HEADERS: [&str; 5] = ["Count", "Estimate", "Spent", "Overtime", "Projected"];

fn component_headers<'a>(components: impl IntoIterator<Item = &'a str>, metrics: [&str; 5]) -> Vec<String> {
    components
        .into_iter()
        .flat_map(|name| metrics.map(|metric| format!("{name} {metric}")))
        .collect()
}

fn component_values(component: &ComponentCell) -> [String; 5] {
    match component.cell() {
        Some(cell) => [
            cell.count.to_string(),
            format_hours(cell.estimate),
            format_hours(cell.spent),
            format_hours(cell.left),
            format_ratio(cell.overtime),
        ],
        None => core::array::from_fn(|_| BLANK.to_string()),
    }
}

fn component_period_values(component: &ComponentCell) -> [String; 5] {
    match component.cell() {
        Some(cell) => [
            cell.count.to_string(),
            format_hours(cell.estimate),
            format_hours(cell.spent),
            format_ratio(cell.overtime),
            format_optional_hours(cell.projected_estimate),
        ],
        None => core::array::from_fn(|_| BLANK.to_string()),
    }
}

fn cross_tab_row(row: &CrossTabRow, style: RowStyle) -> TableRow {
    let cells = core::iter::once(row.label.clone())
        .chain(cell_values(&row.cell))
        .chain(row.components.iter().flat_map(component_values))
        .collect();
    TableRow::new(cells, style)
}

fn cross_tab_table(tab: &CrossTab) -> Table {
    let mut headers = headers(core::iter::once("Name").chain(CELL_HEADERS));
    headers.extend(component_headers(
        tab.components.iter().map(|c| c.name.as_str()),
        COMPONENT_CELL_HEADERS,
    ));

    let mut rows: Vec<TableRow> = tab.rows.iter().map(|row| cross_tab_row(row, cell_style(&row.cell))).collect();
    if let Some(summary) = &tab.summary {
        rows.push(cross_tab_row(summary, RowStyle::Total));
    }

    Table { headers, rows }
}

fn projected_values(cells: &ProjectedCells) -> impl Iterator<Item = String> + '_ {
    cell_values(&cells.cell)
        .chain(core::iter::once(format_optional_hours(cells.cell.projected_estimate)))
        .chain(cells.components.iter().flat_map(component_period_values))
}

fn timeline_table(grid: &TimelineGrid) -> Table {
    let mut headers = headers(
        ["Name", "Start", "End", "Closed"]
            .into_iter()
            .chain(CELL_HEADERS)
            .chain(core::iter::once("Projected")),
    );
    headers.extend(component_headers(
        grid.components.iter().map(|c| c.name.as_str()),
        COMPONENT_PERIOD_HEADERS,
    ));

    let mut rows: Vec<TableRow> = grid
        .rows
        .iter()
        .map(|row| {
            let cells = [
                row.label.clone(),
                format_date(row.start),
                format_date(row.end),
                if row.closed { "yes" } else { "no" }.to_string(),
            ]
            .into_iter()
            .chain(projected_values(&row.cells))
            .collect();
            TableRow::new(cells, cell_style(&row.cells.cell))
        })
        .collect();

    let summary = ["Summary".to_string(), BLANK.to_string(), BLANK.to_string(), BLANK.to_string()]
        .into_iter()
        .chain(projected_values(&grid.summary))
        .collect();
    rows.push(TableRow::new(summary, RowStyle::Total));

    Table { headers, rows }
}

fn line_values(line: &IssueLine) -> impl Iterator<Item = String> {
    let assignee = if line.assignee.is_empty() {
        BLANK.to_string()
    } else {
        line.assignee.clone()
    };

    [
        line.key.clone(),
        line.summary.clone(),
        line.issue_type.clone(),
        line.status.clone(),
        assignee,
    ]
    .into_iter()
}

fn share_values(share: Option<&Share>) -> [String; 2] {
    match share {
        Some(share) => [format_hours(share.estimate), format_hours(share.spent)],
        None => [BLANK.to_string(), BLANK.to_string()],
    }
}

fn breakdown_table(grid: &BreakdownGrid) -> Table {
    let mut headers = headers(LINE_HEADERS);
    for column in &grid.columns {
        headers.push(format!("{} Estimate", column.label));
        headers.push(format!("{} Spent", column.label));
    }

    let mut rows: Vec<TableRow> = grid
        .rows
        .iter()
        .map(|row| {
            let cells = line_values(&row.line)
                .chain(row.shares.iter().flat_map(|share| share_values(share.as_ref())))
                .collect();
            TableRow::new(cells, RowStyle::Status(row.line.status_class))
        })
        .collect();

    let totals = ["Total", "", "", "", ""]
        .into_iter()
        .map(str::to_string)
        .chain(grid.totals.iter().flat_map(|share| share_values(Some(share))))
        .collect();
    rows.push(TableRow::new(totals, RowStyle::Total));

    Table { headers, rows }
}

fn parents_table(table: &ParentTable) -> Table {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let style = if row.estimate != 0.0 && row.spent > row.estimate {
                RowStyle::Overspent
            } else {
                RowStyle::Plain
            };

            TableRow::new(
                vec![
                    row.key.clone(),
                    row.summary.clone(),
                    row.status.clone().unwrap_or_else(|| BLANK.to_string()),
                    row.tasks.to_string(),
                    row.qa.to_string(),
                    row.completed.to_string(),
                    format_hours(row.estimate),
                    format_hours(row.spent),
                    format_hours(row.left),
                ],
                style,
            )
        })
        .collect();

    Table {
        headers: headers(["Key", "Summary", "Status", "Tasks", "QA", "Completed", "Estimate", "Spent", "Left"]),
        rows,
    }
}

fn issues_table(list: &IssueList) -> Table {
    let mut rows: Vec<TableRow> = list
        .rows
        .iter()
        .map(|line| {
            let cells = line_values(line)
                .chain([
                    line.components.join(", "),
                    format_hours(line.estimate),
                    format_hours(line.spent),
                ])
                .collect();
            TableRow::new(cells, RowStyle::Status(line.status_class))
        })
        .collect();

    let total = ["Total", "", "", "", "", ""]
        .into_iter()
        .map(str::to_string)
        .chain([format_hours(list.total.estimate), format_hours(list.total.spent)])
        .collect();
    rows.push(TableRow::new(total, RowStyle::Total));

    Table {
        headers: headers(LINE_HEADERS.into_iter().chain(["Components", "Estimate", "Spent"])),
        rows,
    }
}
