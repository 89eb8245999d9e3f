use super::{Assignee, Board, Component, Status, Version};
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs;

const LOG_TARGET: &str = "  snapshot";

/// An exported tracker snapshot, as read from disk.
#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub sprint_issues: Vec<SprintIssue>,
}

impl Snapshot {
    pub fn load(path: &Utf8Path) -> Result<Self> {
        log::info!(target: LOG_TARGET, "Loading snapshot from '{path}'");

        let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read snapshot '{path}'"))?;
        let snapshot = Self::parse(&text).into_app_err_with(|| format!("unable to parse snapshot '{path}'"))?;

        log::debug!(
            target: LOG_TARGET,
            "Snapshot '{}' has {} issues, {} versions, {} boards",
            snapshot.project,
            snapshot.issues.len(),
            snapshot.versions.len(),
            snapshot.boards.len()
        );

        Ok(snapshot)
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// An issue record in the tracker's own shape.
///
/// Identity fields are optional here so that a missing one is reported by the normalizer with the
/// record's position instead of as an opaque deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub fields: RawFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    #[serde(default)]
    pub components: Option<Vec<Component>>,

    /// Seconds.
    #[serde(default)]
    pub timeoriginalestimate: Option<f64>,

    /// Seconds.
    #[serde(default)]
    pub timespent: Option<f64>,

    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Option<Vec<Version>>,
    #[serde(default)]
    pub issuetype: Option<RawIssueType>,
    #[serde(default)]
    pub parent: Option<RawParent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssueType {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParent {
    pub id: String,
}

/// Membership of an issue in a board's sprint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SprintIssue {
    pub issue_id: String,
    pub board_id: u64,
    pub sprint_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "project": "PRJ",
        "issues": [{
            "id": "10001",
            "key": "PRJ-1",
            "self": "https://example.atlassian.net/rest/api/2/issue/10001",
            "fields": {
                "summary": "Login form",
                "status": {"id": "3", "name": "In Progress", "statusCategory": {"key": "indeterminate"}},
                "assignee": {"accountId": "a1", "displayName": "Ann Lee", "active": true},
                "components": [{"id": "c1", "name": "API"}],
                "timeoriginalestimate": 36000,
                "timespent": null,
                "fixVersions": [{"id": "v1", "name": "1.0", "releaseDate": "2024-02-01"}],
                "issuetype": {"id": "t1", "name": "Task"},
                "parent": {"id": "10000", "key": "PRJ-0"}
            }
        }],
        "boards": [{"id": 7, "name": "Team", "sprints": []}],
        "sprint_issues": [{"issue_id": "10001", "board_id": 7, "sprint_id": 31}]
    }"#;

    #[test]
    fn test_parse_tracker_shape() {
        let snapshot = Snapshot::parse(SAMPLE).unwrap();
        assert_eq!(snapshot.project, "PRJ");
        assert_eq!(snapshot.issues.len(), 1);

        let issue = &snapshot.issues[0];
        assert_eq!(issue.id.as_deref(), Some("10001"));
        assert_eq!(issue.fields.timeoriginalestimate, Some(36000.0));
        assert_eq!(issue.fields.timespent, None);
        assert_eq!(issue.fields.parent.as_ref().map(|p| p.id.as_str()), Some("10000"));
        assert_eq!(snapshot.sprint_issues[0].sprint_id, 31);
        assert!(snapshot.versions.is_empty());
        assert!(snapshot.components.is_empty());
    }

    #[test]
    fn test_parse_empty_object() {
        let snapshot = Snapshot::parse("{}").unwrap();
        assert!(snapshot.issues.is_empty());
        assert!(snapshot.boards.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("snapshot.json")).unwrap();
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        drop(file);

        let snapshot = Snapshot::load(&path).unwrap();
        assert_eq!(snapshot.issues.len(), 1);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Snapshot::load(Utf8Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snapshot.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("broken.json")).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = Snapshot::load(&path).unwrap_err();
        assert!(err.to_string().contains("unable to parse snapshot"));
    }
}
