use super::{CrossTab, CrossTabRow, RowAttr, RowAttrs, Section, SectionContent, SectionKind};
use crate::HashSet;
use crate::facts::{Component, Issue, Status, StatusClass, not_finished_rank};
use crate::metrics::{Partitions, aggregate, component_cells, group_by};

const UNASSIGNED: &str = "Unassigned";

/// Versioned issues that are still being worked on and are fully tagged with catalog components.
fn population<'a>(partitions: &Partitions<'a>, catalog: &[Component]) -> Vec<&'a Issue> {
    partitions
        .versioned
        .iter()
        .copied()
        .filter(|issue| issue.status_class() == StatusClass::NotFinished)
        .filter(|issue| {
            !issue.components.is_empty()
                && issue
                    .components
                    .iter()
                    .all(|component| catalog.iter().any(|known| known.id == component.id))
        })
        .collect()
}

/// Distinct statuses of `issues`, in the fixed not-finished order and then by id.
fn distinct_statuses(issues: &[&Issue]) -> Vec<Status> {
    let mut statuses: Vec<Status> = Vec::new();
    for issue in issues {
        if !statuses.contains(&issue.status) {
            statuses.push(issue.status.clone());
        }
    }

    statuses.sort_by(|a, b| {
        not_finished_rank(&a.name)
            .cmp(&not_finished_rank(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    statuses
}

/// Effort per in-progress status, crossed with the component catalog.
pub fn build_statuses(partitions: &Partitions<'_>, catalog: &[Component]) -> Section {
    let issues = population(partitions, catalog);
    if issues.is_empty() {
        return Section::empty(SectionKind::Statuses, "Statuses");
    }

    let statuses = distinct_statuses(&issues);
    let rows = group_by(&issues, &statuses, |issue| [issue.status.clone()])
        .into_iter()
        .map(|group| CrossTabRow {
            label: group.key.name.clone(),
            attrs: RowAttrs::from([(RowAttr::StatusId, group.key.id.clone())]),
            cell: aggregate(&group.issues),
            components: component_cells(&group.issues, catalog),
        })
        .collect();

    let summary = CrossTabRow {
        label: "Summary".to_string(),
        attrs: RowAttrs::new(),
        cell: aggregate(&issues),
        components: component_cells(&issues, catalog),
    };

    Section::new(
        SectionKind::Statuses,
        "Statuses",
        SectionContent::CrossTab(CrossTab {
            components: catalog.to_vec(),
            rows,
            summary: Some(summary),
        }),
    )
}

/// Assignee identities in order of first appearance, with unassigned work as its own entry.
fn assignees_in_order(issues: &[Issue]) -> Vec<(Option<String>, String)> {
    let mut seen = HashSet::default();
    let mut ordered = Vec::new();

    for issue in issues {
        let id = issue.assignee_id().map(str::to_string);
        if seen.insert(id.clone()) {
            let label = issue
                .assignee
                .as_ref()
                .map_or_else(|| UNASSIGNED.to_string(), |a| a.display_name.clone());
            ordered.push((id, label));
        }
    }

    ordered
}

/// Effort per assignee over the in-progress population. Assignees without such work are left out.
pub fn build_assignees(all_issues: &[Issue], partitions: &Partitions<'_>, catalog: &[Component]) -> Section {
    let issues = population(partitions, catalog);
    if issues.is_empty() {
        return Section::empty(SectionKind::Assignees, "Assignees");
    }

    let assignees = assignees_in_order(all_issues);
    let ids: Vec<Option<String>> = assignees.iter().map(|(id, _)| id.clone()).collect();

    let rows = group_by(&issues, &ids, |issue| [issue.assignee_id().map(str::to_string)])
        .into_iter()
        .zip(&assignees)
        .filter(|(group, _)| !group.issues.is_empty())
        .map(|(group, (id, label))| {
            let mut attrs = RowAttrs::new();
            if let Some(id) = id {
                let _ = attrs.insert(RowAttr::AssigneeId, id.clone());
            }

            CrossTabRow {
                label: label.clone(),
                attrs,
                cell: aggregate(&group.issues),
                components: component_cells(&group.issues, catalog),
            }
        })
        .collect();

    Section::new(
        SectionKind::Assignees,
        "Assignees",
        SectionContent::CrossTab(CrossTab {
            components: catalog.to_vec(),
            rows,
            summary: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Assignee, Version};
    use crate::metrics::{ComponentCell, partition};

    fn catalog() -> Vec<Component> {
        vec![Component::new("api", "API"), Component::new("web", "Web")]
    }

    fn issue(id: &str, status: (&str, &str), assignee: Option<&str>, components: &[&str], estimate: f64) -> Issue {
        Issue {
            versions: vec![Version::new("v1", "1.0")],
            assignee: assignee.map(|name| Assignee::new(name.to_lowercase(), name)),
            components: components.iter().map(|c| Component::new(*c, c.to_uppercase())).collect(),
            estimate,
            ..Issue::new(id, format!("P-{id}"), Status::new(status.0, status.1))
        }
    }

    fn cross_tab(section: Section) -> CrossTab {
        match section.content {
            SectionContent::CrossTab(tab) => tab,
            other => panic!("expected a cross tab, got {other:?}"),
        }
    }

    const IN_PROGRESS: (&str, &str) = ("3", "In Progress");
    const READY: (&str, &str) = ("2", "Ready for Development");

    #[test]
    fn test_status_rows_follow_fixed_order() {
        let issues = vec![
            issue("1", READY, Some("Ann"), &["api"], 2.0),
            issue("2", IN_PROGRESS, Some("Bob"), &["api"], 3.0),
            issue("3", ("5", "In QA"), Some("Bob"), &["api"], 8.0),
            issue("4", IN_PROGRESS, None, &["web"], 1.0),
        ];
        let partitions = partition(&issues);

        let tab = cross_tab(build_statuses(&partitions, &catalog()));
        let labels: Vec<&str> = tab.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["In Progress", "Ready for Development"]);
        assert_eq!(tab.rows[0].cell.count, 2);
        assert_eq!(tab.rows[0].attrs.get(&RowAttr::StatusId).map(String::as_str), Some("3"));

        let summary = tab.summary.unwrap();
        assert_eq!(summary.cell.count, 3);
        assert_eq!(summary.cell.estimate, 6.0);
    }

    #[test]
    fn test_status_component_cells_blank_when_absent() {
        let issues = vec![issue("1", READY, None, &["api"], 2.0)];
        let partitions = partition(&issues);

        let tab = cross_tab(build_statuses(&partitions, &catalog()));
        assert!(matches!(tab.rows[0].components[0], ComponentCell::Filled(_)));
        assert_eq!(tab.rows[0].components[1], ComponentCell::Empty);
    }

    #[test]
    fn test_population_requires_catalog_components() {
        let issues = vec![
            issue("1", IN_PROGRESS, None, &[], 2.0),
            issue("2", IN_PROGRESS, None, &["api", "mobile"], 2.0),
            Issue {
                versions: vec![],
                ..issue("3", IN_PROGRESS, None, &["api"], 2.0)
            },
        ];
        let partitions = partition(&issues);

        let section = build_statuses(&partitions, &catalog());
        assert_eq!(section.content, SectionContent::Empty);
    }

    #[test]
    fn test_assignee_rows_in_first_appearance_order() {
        let issues = vec![
            issue("1", ("5", "In QA"), Some("Cid"), &["api"], 1.0),
            issue("2", IN_PROGRESS, Some("Bob"), &["api"], 1.0),
            issue("3", IN_PROGRESS, None, &["web"], 2.0),
            issue("4", READY, Some("Ann"), &["api"], 3.0),
            issue("5", READY, Some("Bob"), &["web"], 4.0),
        ];
        let partitions = partition(&issues);

        let tab = cross_tab(build_assignees(&issues, &partitions, &catalog()));
        let labels: Vec<&str> = tab.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Bob", "Unassigned", "Ann"]);
        assert_eq!(tab.rows[0].cell.count, 2);
        assert_eq!(tab.rows[0].attrs.get(&RowAttr::AssigneeId).map(String::as_str), Some("bob"));
        assert!(tab.rows[1].attrs.is_empty());
        assert!(tab.summary.is_none());
    }

    #[test]
    fn test_empty_population_is_empty_section() {
        let partitions = partition(&[]);
        assert_eq!(build_assignees(&[], &partitions, &catalog()).content, SectionContent::Empty);
    }
}
