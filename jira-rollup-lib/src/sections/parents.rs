use super::{ParentRow, ParentTable, RowAttr, RowAttrs, Section, SectionContent, SectionKind};
use crate::facts::{Issue, IssueType};
use crate::metrics::parent_rollups;

pub fn build_epics(issues: &[Issue]) -> Section {
    build(issues, &IssueType::Epic, SectionKind::Epics, "Epics")
}

pub fn build_stories(issues: &[Issue]) -> Section {
    build(issues, &IssueType::Story, SectionKind::Stories, "Stories")
}

fn build(issues: &[Issue], parent_type: &IssueType, kind: SectionKind, title: &str) -> Section {
    let rollups = parent_rollups(issues, parent_type);
    if rollups.is_empty() {
        return Section::empty(kind, title);
    }

    let with_status = *parent_type == IssueType::Story;
    let rows = rollups
        .into_iter()
        .map(|rollup| ParentRow {
            key: rollup.parent.key.clone(),
            summary: rollup.parent.summary.clone(),
            status: with_status.then(|| rollup.parent.status.name.clone()),
            link: rollup.parent.link.clone(),
            tasks: rollup.children.count,
            qa: rollup.qa,
            completed: rollup.completed,
            estimate: rollup.children.estimate,
            spent: rollup.children.spent,
            left: rollup.children.left,
            attrs: RowAttrs::from([(RowAttr::ParentId, rollup.parent.id.to_string())]),
        })
        .collect();

    Section::new(kind, title, SectionContent::Parents(ParentTable { rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{IssueId, Status};

    fn issues() -> Vec<Issue> {
        vec![
            Issue {
                issue_type: IssueType::Story,
                summary: "Checkout".to_string(),
                ..Issue::new("20", "P-20", Status::new("3", "In Progress"))
            },
            Issue {
                parent: Some(IssueId::from("20")),
                estimate: 5.0,
                spent: 6.5,
                ..Issue::new("1", "P-1", Status::new("9", "Completed"))
            },
        ]
    }

    #[test]
    fn test_story_rows_carry_status() {
        let section = build_stories(&issues());
        let SectionContent::Parents(table) = section.content else {
            panic!("expected a parent table");
        };

        let row = &table.rows[0];
        assert_eq!(row.key, "P-20");
        assert_eq!(row.status.as_deref(), Some("In Progress"));
        assert_eq!(row.tasks, 1);
        assert_eq!(row.completed, 1);
        assert_eq!(row.left, 0.0);
        assert_eq!(row.attrs.get(&RowAttr::ParentId).map(String::as_str), Some("20"));
    }

    #[test]
    fn test_no_epics_is_empty() {
        let section = build_epics(&issues());
        assert_eq!(section.kind, SectionKind::Epics);
        assert_eq!(section.content, SectionContent::Empty);
    }
}
