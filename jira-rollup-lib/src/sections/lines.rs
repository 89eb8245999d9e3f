use super::{IssueLine, RowAttr, RowAttrs};
use crate::facts::Issue;

/// Shortens every name after the first to an initial.
///
/// `"User Local Host"` becomes `"User L. H."`.
#[must_use]
pub fn format_name(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut formatted = first.to_string();
    for word in words {
        if let Some(initial) = word.chars().next() {
            formatted.push(' ');
            formatted.push(initial);
            formatted.push('.');
        }
    }

    formatted
}

/// Status, assignee, and parent identifiers of an issue.
#[must_use]
pub fn issue_attrs(issue: &Issue) -> RowAttrs {
    let mut attrs = RowAttrs::new();
    let _ = attrs.insert(RowAttr::StatusId, issue.status.id.clone());

    if let Some(assignee) = &issue.assignee {
        let _ = attrs.insert(RowAttr::AssigneeId, assignee.account_id.clone());
    }

    if let Some(parent) = &issue.parent {
        let _ = attrs.insert(RowAttr::ParentId, parent.to_string());
    }

    attrs
}

#[must_use]
pub fn issue_line(issue: &Issue) -> IssueLine {
    IssueLine {
        key: issue.key.clone(),
        summary: issue.summary.clone(),
        issue_type: issue.issue_type.name().to_string(),
        status: issue.status.name.clone(),
        status_class: issue.status_class(),
        assignee: issue.assignee.as_ref().map(|a| format_name(&a.display_name)).unwrap_or_default(),
        components: issue.components.iter().map(|c| c.name.clone()).collect(),
        estimate: issue.estimate,
        spent: issue.spent,
        link: issue.link.clone(),
        attrs: issue_attrs(issue),
    }
}
