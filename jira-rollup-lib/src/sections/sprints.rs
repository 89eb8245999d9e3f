use super::{
    BreakdownColumn, BreakdownGrid, BreakdownGridRow, RowAttr, RowAttrs, Section, SectionContent, SectionKind,
    TimelineGrid, TimelineGridRow, issue_line,
};
use crate::facts::{Board, Component, Dataset, Issue, Sprint};
use crate::metrics::{Partitions, SprintKey, Timeline, breakdown, issues_with_component, project_timeline};

fn sprint_key(issue: &Issue) -> Option<u64> {
    issue.sprint.map(|s| s.sprint_id)
}

fn sprint_attrs(board: &Board, sprint: &Sprint) -> RowAttrs {
    RowAttrs::from([
        (RowAttr::SprintId, sprint.id.to_string()),
        (RowAttr::BoardId, board.id.to_string()),
    ])
}

/// Sprint timeline and component breakdowns for every board.
///
/// Each board only sees the issues assigned to one of its sprints. A board without sprints yields
/// a single empty section.
pub fn build(partitions: &Partitions<'_>, dataset: &Dataset) -> Vec<Section> {
    if dataset.boards.is_empty() {
        return vec![Section::empty(SectionKind::Sprints, "Sprints")];
    }

    let mut sections = Vec::new();
    for board in &dataset.boards {
        let title = format!("Sprints: {}", board.name);
        if board.sprints.is_empty() {
            sections.push(Section::empty(SectionKind::Sprints, title));
            continue;
        }

        let issues: Vec<&Issue> = partitions
            .sprinted
            .iter()
            .copied()
            .filter(|issue| issue.sprint.is_some_and(|s| s.board_id == board.id))
            .collect();

        let timeline = Timeline::of_sprints(&board.sprints, dataset.now);
        sections.push(board_timeline(board, title, &timeline, &issues, &dataset.components));
        sections.extend(board_breakdowns(board, &timeline, &issues, &dataset.components));
    }

    sections
}

fn board_timeline(
    board: &Board,
    title: String,
    timeline: &Timeline<&Sprint, SprintKey>,
    issues: &[&Issue],
    catalog: &[Component],
) -> Section {
    let projected = project_timeline(timeline, issues, catalog, |sprint| sprint.id, sprint_key);

    let rows = projected
        .rows
        .into_iter()
        .map(|row| TimelineGridRow {
            label: row.item.name.clone(),
            start: row.item.start_date.map(|d| d.date_naive()),
            end: row.item.end_date.map(|d| d.date_naive()),
            closed: row.closed,
            attrs: sprint_attrs(board, row.item),
            cells: row.cells,
        })
        .collect();

    Section::new(
        SectionKind::Sprints,
        title,
        SectionContent::Timeline(TimelineGrid {
            components: catalog.to_vec(),
            rows,
            summary: projected.summary,
        }),
    )
}

fn board_breakdowns(
    board: &Board,
    timeline: &Timeline<&Sprint, SprintKey>,
    issues: &[&Issue],
    catalog: &[Component],
) -> Vec<Section> {
    let columns: Vec<u64> = timeline.items().map(|s| s.id).collect();

    catalog
        .iter()
        .filter_map(|component| {
            let members = issues_with_component(issues, component);
            if members.is_empty() {
                return None;
            }

            let headers = timeline
                .items()
                .map(|sprint| {
                    let mut attrs = sprint_attrs(board, sprint);
                    let _ = attrs.insert(RowAttr::ComponentId, component.id.clone());
                    BreakdownColumn {
                        label: sprint.name.clone(),
                        date: sprint.end_date.map(|d| d.date_naive()),
                        attrs,
                    }
                })
                .collect();

            let grid = breakdown(&members, &columns, |issue| sprint_key(issue).into_iter().collect());
            let rows = grid
                .rows
                .into_iter()
                .map(|row| {
                    let mut line = issue_line(row.issue);
                    let _ = line.attrs.insert(RowAttr::BoardId, board.id.to_string());
                    let _ = line.attrs.insert(RowAttr::ComponentId, component.id.clone());
                    BreakdownGridRow {
                        line,
                        shares: row.shares,
                    }
                })
                .collect();

            Some(Section::new(
                SectionKind::Sprints,
                format!("{} / {}", board.name, component.name),
                SectionContent::Breakdown(BreakdownGrid {
                    component: component.clone(),
                    columns: headers,
                    rows,
                    totals: grid.totals,
                }),
            ))
        })
        .collect()
}
