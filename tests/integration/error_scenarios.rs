use predicates::prelude::*;

use crate::common::{FileAssert, TestProject};

/// Missing base template is fatal
#[test]
fn test_markdown_missing_base() {
    let project = TestProject::new().unwrap();

    project
        .tmplmerge()
        .args(["markdown", "--base", "nope.md", "-o", "CLAUDE.md"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Required input not found: nope.md"))
        .stderr(predicate::str::contains("suggestion"));

    FileAssert::not_exists(project.path("CLAUDE.md"));
}

/// A bad configuration file is reported before anything runs
#[test]
fn test_invalid_config_file() {
    let project = TestProject::new().unwrap();
    project.write("base.md", "# Project Guidelines\n").unwrap();
    project.write("bad.toml", "[markdown]\nunknown = 1\n").unwrap();

    project
        .tmplmerge()
        .args(["--config", "bad.toml", "markdown", "--base", "base.md", "-o", "CLAUDE.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration file bad.toml"));

    FileAssert::not_exists(project.path("CLAUDE.md"));
}

/// Overlay that is JSON but not an object
#[test]
fn test_config_non_object_overlay() {
    let project = TestProject::new().unwrap();
    project.write("list.json", "[1, 2, 3]").unwrap();

    project
        .tmplmerge()
        .args(["config", "--type", "settings", "-o", "out.json", "list.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a JSON object"));

    FileAssert::not_exists(project.path("out.json"));
}

/// Missing catalog donor is fatal
#[test]
fn test_catalog_missing_donor() {
    let project = TestProject::new().unwrap();
    project.write("target.json", "{\"components\": {}}").unwrap();

    project
        .tmplmerge()
        .args(["catalog", "--target", "target.json", "--donor", "gone.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Required input not found: gone.json"));
}

/// Verbose and quiet cannot be combined
#[test]
fn test_verbose_quiet_conflict() {
    let project = TestProject::new().unwrap();

    project
        .tmplmerge()
        .args(["-v", "-q", "migrate-state", "state.json"])
        .assert()
        .failure();
}
