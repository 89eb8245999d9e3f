//! Integration tests for the `report`, `init`, and `validate` commands driven through `run`.

use camino::Utf8PathBuf;
use jira_rollup_lib::Host;

const FIXTURE: &str = "tests/fixtures/small-project.json";

/// Test host that appends output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
}

#[test]
fn test_report_to_console_by_default() {
    let mut host = TestHost::new();
    let result = jira_rollup_lib::run(&mut host, ["jira-rollup", "report", FIXTURE, "--color", "never"]);
    assert!(result.is_ok(), "report should succeed: {result:?}");

    let output = host.output_str();
    assert!(output.starts_with("PRJ rollup, generated "));
    for title in ["\nProject\n", "\nVersions\n", "\nSprints: Team\n", "\nTeam / API\n", "\nBacklog\n"] {
        assert!(output.contains(title), "missing {title:?} in:\n{output}");
    }
    assert!(!output.contains('\u{1b}'));
}

#[test]
fn test_report_to_files_only() {
    let dir = tempfile::tempdir().unwrap();
    let json = temp_path(&dir, "report.json");
    let csv = temp_path(&dir, "report.csv");

    let mut host = TestHost::new();
    jira_rollup_lib::run(
        &mut host,
        ["jira-rollup", "report", FIXTURE, "--json", json.as_str(), "--csv", csv.as_str()],
    )
    .unwrap();

    assert!(host.output_str().is_empty(), "console output should be suppressed");

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["project"], "PRJ");
    assert_eq!(value["sections"].as_array().map(Vec::len), Some(12));
    assert_eq!(value["sections"][0]["content"]["type"], "project");

    let csv_text = std::fs::read_to_string(&csv).unwrap();
    assert!(csv_text.lines().any(|line| line == "project,Project"));
    assert!(csv_text.lines().any(|line| line == "sprints,Team / API"));
}

#[test]
fn test_report_with_console_and_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_path(&dir, "rollup.toml");
    std::fs::write(&config, "sections = [\"epics\", \"backlog\"]\nempty_placeholder = \"(nothing)\"\n").unwrap();
    let json = temp_path(&dir, "report.json");

    let mut host = TestHost::new();
    jira_rollup_lib::run(
        &mut host,
        [
            "jira-rollup",
            "report",
            FIXTURE,
            "--config",
            config.as_str(),
            "--json",
            json.as_str(),
            "--console",
            "--color",
            "never",
        ],
    )
    .unwrap();

    let output = host.output_str();
    assert!(output.contains("\nEpics\n"));
    assert!(output.contains("\nBacklog\n"));
    assert!(!output.contains("\nProject\n"));
    assert!(json.exists());
}

#[test]
fn test_report_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let missing = temp_path(&dir, "absent.json");

    let mut host = TestHost::new();
    let err = jira_rollup_lib::run(&mut host, ["jira-rollup", "report", missing.as_str()]).unwrap_err();
    assert!(err.to_string().contains("unable to read snapshot"));
    assert!(host.output_str().is_empty());
}

#[test]
fn test_report_malformed_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = temp_path(&dir, "bad.json");
    std::fs::write(&snapshot, r#"{"project": "PRJ", "issues": [{"id": "1"}]}"#).unwrap();

    let mut host = TestHost::new();
    let err = jira_rollup_lib::run(&mut host, ["jira-rollup", "report", snapshot.as_str()]).unwrap_err();
    assert!(err.to_string().contains("missing 'key'"));
}

#[test]
fn test_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_path(&dir, "rollup.toml");

    let mut host = TestHost::new();
    jira_rollup_lib::run(&mut host, ["jira-rollup", "init", config.as_str()]).unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));

    let mut host = TestHost::new();
    jira_rollup_lib::run(&mut host, ["jira-rollup", "validate", "--config", config.as_str()]).unwrap();
    assert!(host.output_str().contains("Configuration file is valid"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_path(&dir, "rollup.toml");
    std::fs::write(&config, "sections = []\n").unwrap();

    let mut host = TestHost::new();
    let result = jira_rollup_lib::run(&mut host, ["jira-rollup", "validate", "--config", config.as_str()]);

    assert!(result.is_err());
    assert_eq!(host.exit_code, Some(1));
    assert!(host.error_str().contains("at least one section"));
}
