use super::{
    BreakdownColumn, BreakdownGrid, BreakdownGridRow, RowAttr, RowAttrs, Section, SectionContent, SectionKind,
    TimelineGrid, TimelineGridRow, issue_line,
};
use crate::facts::{Component, Issue, Version};
use crate::metrics::{Partitions, Timeline, breakdown, issues_with_component, project_timeline};

fn version_keys(issue: &Issue) -> Vec<String> {
    issue.active_versions().map(|v| v.id.clone()).collect()
}

fn version_attrs(version: &Version) -> RowAttrs {
    RowAttrs::from([(RowAttr::VersionId, version.id.clone())])
}

/// Version timeline over the versioned partition with overtime projection.
pub fn build_timeline(partitions: &Partitions<'_>, versions: &[Version], catalog: &[Component]) -> Section {
    if partitions.versioned.is_empty() {
        return Section::empty(SectionKind::Versions, "Versions");
    }

    let timeline = Timeline::of_versions(versions);
    let projected = project_timeline(
        &timeline,
        &partitions.versioned,
        catalog,
        |version| version.id.clone(),
        version_keys,
    );

    let rows = projected
        .rows
        .into_iter()
        .map(|row| TimelineGridRow {
            label: row.item.name.clone(),
            start: row.item.start_date,
            end: row.item.release_date,
            closed: row.closed,
            attrs: version_attrs(row.item),
            cells: row.cells,
        })
        .collect();

    Section::new(
        SectionKind::Versions,
        "Versions",
        SectionContent::Timeline(TimelineGrid {
            components: catalog.to_vec(),
            rows,
            summary: projected.summary,
        }),
    )
}

/// One breakdown per catalog component present in the versioned partition, with each issue's
/// effort split across its active versions.
pub fn build_breakdowns(partitions: &Partitions<'_>, versions: &[Version], catalog: &[Component]) -> Vec<Section> {
    let timeline = Timeline::of_versions(versions);
    let columns: Vec<String> = timeline.items().map(|v| v.id.clone()).collect();
    let headers: Vec<BreakdownColumn> = timeline
        .items()
        .map(|v| BreakdownColumn {
            label: v.name.clone(),
            date: v.release_date,
            attrs: version_attrs(v),
        })
        .collect();

    let sections: Vec<Section> = catalog
        .iter()
        .filter_map(|component| {
            let issues = issues_with_component(&partitions.versioned, component);
            if issues.is_empty() {
                return None;
            }

            let grid = breakdown(&issues, &columns, version_keys);
            let rows = grid
                .rows
                .into_iter()
                .map(|row| BreakdownGridRow {
                    line: issue_line(row.issue),
                    shares: row.shares,
                })
                .collect();

            Some(Section::new(
                SectionKind::VersionBreakdowns,
                format!("Versions / {}", component.name),
                SectionContent::Breakdown(BreakdownGrid {
                    component: component.clone(),
                    columns: headers.clone(),
                    rows,
                    totals: grid.totals,
                }),
            ))
        })
        .collect();

    if sections.is_empty() {
        return vec![Section::empty(SectionKind::VersionBreakdowns, "Version Breakdowns")];
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::Status;
    use crate::metrics::{ComponentCell, partition};
    use chrono::NaiveDate;

    fn version(id: &str, day: u32, released: bool) -> Version {
        Version {
            released,
            release_date: NaiveDate::from_ymd_opt(2024, 1, day),
            ..Version::new(id, id.to_uppercase())
        }
    }

    fn issue(id: &str, versions: &[&Version], components: &[&str], estimate: f64, spent: f64) -> Issue {
        Issue {
            versions: versions.iter().map(|v| (*v).clone()).collect(),
            components: components.iter().map(|c| Component::new(*c, c.to_uppercase())).collect(),
            estimate,
            spent,
            ..Issue::new(id, format!("P-{id}"), Status::new("3", "In Progress"))
        }
    }

    fn timeline_grid(section: Section) -> TimelineGrid {
        match section.content {
            SectionContent::Timeline(grid) => grid,
            other => panic!("expected a timeline, got {other:?}"),
        }
    }

    #[test]
    fn test_version_timeline_scenario() {
        let v1 = version("v1", 10, true);
        let v2 = version("v2", 20, true);
        let v3 = version("v3", 30, false);
        let catalog = vec![Component::new("api", "API"), Component::new("web", "WEB")];
        let issues = vec![
            issue("1", &[&v1], &["api"], 10.0, 12.0),
            issue("2", &[&v2], &["api"], 20.0, 18.0),
            issue("3", &[&v3], &["api"], 15.0, 0.0),
        ];
        let partitions = partition(&issues);

        let grid = timeline_grid(build_timeline(&partitions, &[v3.clone(), v1.clone(), v2.clone()], &catalog));

        let labels: Vec<&str> = grid.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["V1", "V2", "V3"]);
        assert_eq!(grid.rows[0].cells.cell.overtime, Some(1.2));
        assert_eq!(grid.rows[2].cells.cell.overtime, None);
        let projected = grid.rows[2].cells.cell.projected_estimate.unwrap();
        assert!((projected - 15.8).abs() < 1e-9);
        assert_eq!(grid.rows[2].attrs.get(&RowAttr::VersionId).map(String::as_str), Some("v3"));

        for row in &grid.rows {
            assert_eq!(row.cells.components[1], ComponentCell::Empty);
        }
        assert_eq!(grid.summary.cell.count, 3);
    }

    #[test]
    fn test_multi_version_issue_in_every_version_group() {
        let v1 = version("v1", 10, true);
        let v2 = version("v2", 20, false);
        let issues = vec![issue("1", &[&v1, &v2], &[], 10.0, 0.0)];
        let partitions = partition(&issues);

        let grid = timeline_grid(build_timeline(&partitions, &[v1.clone(), v2.clone()], &[]));
        assert_eq!(grid.rows[0].cells.cell.estimate, 10.0);
        assert_eq!(grid.rows[1].cells.cell.estimate, 10.0);
        assert_eq!(grid.summary.cell.estimate, 10.0);
    }

    #[test]
    fn test_no_versioned_issues_is_empty() {
        let partitions = partition(&[]);
        let section = build_timeline(&partitions, &[version("v1", 1, true)], &[]);
        assert_eq!(section.content, SectionContent::Empty);
    }

    #[test]
    fn test_breakdown_splits_multi_version_effort() {
        let v1 = version("v1", 10, true);
        let v2 = version("v2", 20, false);
        let catalog = vec![Component::new("api", "API"), Component::new("web", "WEB")];
        let issues = vec![
            issue("1", &[&v1, &v2], &["api"], 10.0, 4.0),
            issue("2", &[&v2], &["api"], 3.0, 0.0),
        ];
        let partitions = partition(&issues);

        let sections = build_breakdowns(&partitions, &[v1.clone(), v2.clone()], &catalog);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Versions / API");

        let SectionContent::Breakdown(grid) = &sections[0].content else {
            panic!("expected a breakdown");
        };
        assert_eq!(grid.columns.len(), 2);
        assert_eq!(grid.rows[0].shares[0].map(|s| s.estimate), Some(5.0));
        assert_eq!(grid.rows[0].shares[1].map(|s| s.estimate), Some(5.0));
        assert_eq!(grid.totals[0].estimate, 5.0);
        assert_eq!(grid.totals[1].estimate, 8.0);
    }

    #[test]
    fn test_breakdowns_without_components() {
        let partitions = partition(&[]);
        let sections = build_breakdowns(&partitions, &[], &[Component::new("api", "API")]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, SectionContent::Empty);
    }
}
