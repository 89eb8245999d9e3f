use super::{Issue, IssueId, IssueType, RawIssue, SprintAssignment};
use crate::Result;
use crate::metrics::{ratio, round2};
use ohno::bail;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Converts a raw tracker record into a canonical [`Issue`].
///
/// `index` is the record's position in the snapshot and only serves error reporting. A record
/// without an `id` or `key` fails the whole run.
pub fn normalize_issue(index: usize, raw: RawIssue, sprint: Option<SprintAssignment>) -> Result<Issue> {
    let Some(id) = raw.id.filter(|id| !id.is_empty()) else {
        bail!("malformed issue record #{index}: missing 'id'");
    };

    let Some(key) = raw.key.filter(|key| !key.is_empty()) else {
        bail!("malformed issue record #{index} (id '{id}'): missing 'key'");
    };

    let fields = raw.fields;
    let estimate = hours(fields.timeoriginalestimate);
    let spent = hours(fields.timespent);

    Ok(Issue {
        id: IssueId::new(id),
        key,
        summary: fields.summary.unwrap_or_default(),
        status: fields.status.unwrap_or_default(),
        assignee: fields.assignee,
        components: fields.components.unwrap_or_default(),
        estimate,
        spent,
        ratio: ratio(spent, estimate).map_or(0.0, round2),
        versions: fields.fix_versions.unwrap_or_default(),
        issue_type: fields.issuetype.map(|t| IssueType::from_name(&t.name)).unwrap_or_default(),
        parent: fields.parent.map(|p| IssueId::new(p.id)),
        sprint,
        link: raw.link.or(raw.self_url),
    })
}

fn hours(seconds: Option<f64>) -> f64 {
    seconds.map_or(0.0, |s| (s / SECONDS_PER_HOUR).max(0.0))
}
