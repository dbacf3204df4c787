use serde_json::json;
use tmplmerge::test_utils::JsonFixture;

use crate::common::{FileAssert, TestProject};

const STATE: &str = ".claude/.activated-overlays.json";

/// Missing state file: silent success, nothing created
#[test]
fn test_migrate_missing_file() {
    let project = TestProject::new().unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE, "--template-version", "1.2.0"])
        .assert()
        .success()
        .stdout("")
        .stderr("");

    FileAssert::not_exists(project.path(STATE));
}

/// Legacy state gains schema 2 defaults
#[test]
fn test_migrate_legacy_state() {
    let project = TestProject::new().unwrap();
    let mut fixture = JsonFixture::legacy_state();
    fixture.name = STATE.to_string();
    fixture.write_to(project.project_path()).unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        project.read_json(STATE),
        json!({
            "overlays": ["web-dev"],
            "schema_version": 2,
            "template_version": "1.0.0",
            "activated_at": "unknown",
            "external_components": {}
        })
    );
    assert!(project.read(STATE).ends_with("}\n"));
}

/// Current state with a new template version is re-stamped
#[test]
fn test_migrate_stamps_new_version() {
    let project = TestProject::new().unwrap();
    JsonFixture::raw(
        STATE,
        json!({"schema_version": 2, "template_version": "1.0.0", "activated_at": "2025-06-01"}),
    )
    .write_to(project.project_path())
    .unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE, "--template-version", "1.3.0"])
        .assert()
        .success();

    let state = project.read_json(STATE);
    assert_eq!(state["template_version"], "1.3.0");
    assert_eq!(state["activated_at"], "2025-06-01");
}

/// Up-to-date state is not rewritten
#[test]
fn test_migrate_current_state_untouched() {
    let project = TestProject::new().unwrap();
    let original = r#"{"schema_version":2,"template_version":"1.0.0"}"#;
    project.write(STATE, original).unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE, "--template-version", "1.0.0"])
        .assert()
        .success();

    FileAssert::equals(project.path(STATE), original);
}

/// Corrupt state is left alone and the command still succeeds
#[test]
fn test_migrate_corrupt_state_untouched() {
    let project = TestProject::new().unwrap();
    project.write(STATE, "{ broken").unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE])
        .assert()
        .success()
        .stdout("");

    FileAssert::equals(project.path(STATE), "{ broken");
}

/// A non-integer schema version is treated like corrupt state
#[test]
fn test_migrate_invalid_schema_version_untouched() {
    let project = TestProject::new().unwrap();
    let original = r#"{"schema_version": "two"}"#;
    project.write(STATE, original).unwrap();

    project
        .tmplmerge()
        .args(["migrate-state", STATE, "--template-version", "1.0.0"])
        .assert()
        .success();

    FileAssert::equals(project.path(STATE), original);
}
