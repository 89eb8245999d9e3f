use super::{Board, Component, Issue, Snapshot, SprintAssignment, Version, normalize_issue};
use crate::{HashMap, HashSet, Result, hash_map_with_capacity};
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = " normalize";

/// Everything a report is computed from: normalized issues plus the version, board, and
/// component catalogs.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub project: String,
    pub issues: Vec<Issue>,
    pub versions: Vec<Version>,
    pub boards: Vec<Board>,
    pub components: Vec<Component>,

    /// Stand-in for missing sprint dates.
    pub now: DateTime<Utc>,
}

impl Dataset {
    /// Normalizes a snapshot.
    ///
    /// Fails if any issue record lacks its identity, in which case nothing is produced.
    pub fn from_snapshot(snapshot: Snapshot, now: DateTime<Utc>) -> Result<Self> {
        let assignments = sprint_assignments(&snapshot, now);

        let issues = snapshot
            .issues
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let sprint = raw.id.as_deref().and_then(|id| assignments.get(id).copied());
                normalize_issue(index, raw, sprint)
            })
            .collect::<Result<Vec<_>>>()?;

        let components = if snapshot.components.is_empty() {
            derive_components(&issues)
        } else {
            snapshot.components
        };

        log::info!(
            target: LOG_TARGET,
            "Normalized {} issues with {} components and {} boards",
            issues.len(),
            components.len(),
            snapshot.boards.len()
        );

        Ok(Self {
            project: snapshot.project,
            issues,
            versions: snapshot.versions,
            boards: snapshot.boards,
            components,
            now,
        })
    }

    #[must_use]
    pub fn board(&self, board_id: u64) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }
}

/// Resolves each issue's sprint membership, keeping the chronologically latest sprint when an
/// issue is listed in several, across all boards.
fn sprint_assignments(snapshot: &Snapshot, now: DateTime<Utc>) -> HashMap<String, SprintAssignment> {
    let mut sort_keys = HashMap::default();
    for board in &snapshot.boards {
        for sprint in &board.sprints {
            let _ = sort_keys.insert((board.id, sprint.id), sprint.sort_key(now));
        }
    }

    let mut assignments: HashMap<String, SprintAssignment> = hash_map_with_capacity(snapshot.sprint_issues.len());
    for entry in &snapshot.sprint_issues {
        let Some(&sort_key) = sort_keys.get(&(entry.board_id, entry.sprint_id)) else {
            log::warn!(
                target: LOG_TARGET,
                "Ignoring membership of issue '{}' in unknown sprint {} of board {}",
                entry.issue_id,
                entry.sprint_id,
                entry.board_id
            );
            continue;
        };

        let candidate = SprintAssignment {
            board_id: entry.board_id,
            sprint_id: entry.sprint_id,
            sort_key,
        };

        let _ = assignments
            .entry(entry.issue_id.clone())
            .and_modify(|current| {
                if candidate.sort_key > current.sort_key {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    assignments
}

/// Builds a component catalog from the components carried by the issues, unique by id and
/// ordered by name.
fn derive_components(issues: &[Issue]) -> Vec<Component> {
    let mut seen = HashSet::default();
    let mut components: Vec<Component> = issues
        .iter()
        .flat_map(|issue| issue.components.iter())
        .filter(|c| seen.insert(c.id.clone()))
        .cloned()
        .collect();

    components.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{RawFields, RawIssue, Sprint, SprintIssue, SprintState};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn raw(id: &str, components: &[(&str, &str)]) -> RawIssue {
        RawIssue {
            id: Some(id.to_string()),
            key: Some(format!("P-{id}")),
            fields: RawFields {
                components: Some(components.iter().map(|(id, name)| Component::new(*id, *name)).collect()),
                ..RawFields::default()
            },
            ..RawIssue::default()
        }
    }

    fn sprint(id: u64, end: Option<(i32, u32, u32)>) -> Sprint {
        Sprint {
            end_date: end.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            ..Sprint::new(id, format!("S{id}"), SprintState::Closed)
        }
    }

    fn membership(issue_id: &str, board_id: u64, sprint_id: u64) -> SprintIssue {
        SprintIssue {
            issue_id: issue_id.to_string(),
            board_id,
            sprint_id,
        }
    }

    #[test]
    fn test_latest_sprint_wins() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[])],
            boards: vec![Board {
                id: 7,
                name: "Team".to_string(),
                sprints: vec![sprint(1, Some((2024, 1, 14))), sprint(2, Some((2024, 1, 28)))],
            }],
            sprint_issues: vec![membership("1", 7, 2), membership("1", 7, 1)],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        let assignment = dataset.issues[0].sprint.unwrap();
        assert_eq!(assignment.sprint_id, 2);
        assert_eq!(assignment.board_id, 7);
    }

    #[test]
    fn test_latest_sprint_wins_across_boards() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[])],
            boards: vec![
                Board {
                    id: 7,
                    name: "Team".to_string(),
                    sprints: vec![sprint(1, Some((2024, 1, 14)))],
                },
                Board {
                    id: 8,
                    name: "Ops".to_string(),
                    sprints: vec![sprint(5, Some((2024, 1, 28)))],
                },
            ],
            sprint_issues: vec![membership("1", 7, 1), membership("1", 8, 5)],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        let assignment = dataset.issues[0].sprint.unwrap();
        assert_eq!(assignment.board_id, 8);
        assert_eq!(assignment.sprint_id, 5);
    }

    #[test]
    fn test_undated_sprint_sorts_as_now() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[])],
            boards: vec![Board {
                id: 7,
                name: "Team".to_string(),
                sprints: vec![sprint(1, Some((2024, 1, 14))), sprint(2, None)],
            }],
            sprint_issues: vec![membership("1", 7, 1), membership("1", 7, 2)],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        let assignment = dataset.issues[0].sprint.unwrap();
        assert_eq!(assignment.sprint_id, 2);
        assert_eq!(assignment.sort_key, now());
    }

    #[test]
    fn test_unknown_sprint_is_ignored() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[])],
            sprint_issues: vec![membership("1", 7, 99)],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        assert_eq!(dataset.issues[0].sprint, None);
    }

    #[test]
    fn test_component_catalog_derived_when_absent() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[("c2", "Web"), ("c1", "API")]), raw("2", &[("c1", "API")])],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        let names: Vec<&str> = dataset.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["API", "Web"]);
    }

    #[test]
    fn test_explicit_component_catalog_is_kept() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[("c1", "API")])],
            components: vec![Component::new("c9", "Zeta"), Component::new("c1", "API")],
            ..Snapshot::default()
        };

        let dataset = Dataset::from_snapshot(snapshot, now()).unwrap();
        assert_eq!(dataset.components[0].id, "c9");
        assert_eq!(dataset.components.len(), 2);
    }

    #[test]
    fn test_malformed_record_aborts() {
        let snapshot = Snapshot {
            issues: vec![raw("1", &[]), RawIssue::default()],
            ..Snapshot::default()
        };

        let err = Dataset::from_snapshot(snapshot, now()).unwrap_err();
        assert!(err.to_string().contains("#1"));
    }
}
