use predicates::prelude::*;
use serde_json::json;
use tmplmerge::test_utils::JsonFixture;

use crate::common::{FileAssert, TestProject};

/// Settings overlays are deep-merged in order
#[test]
fn test_settings_merge() {
    let project = TestProject::new().unwrap();
    let dir = project.project_path();
    JsonFixture::settings("base/settings.json", &["Read", "Edit"])
        .write_to(dir)
        .unwrap();
    JsonFixture::settings("overlays/web/settings.json", &["Edit", "Bash(npm:*)"])
        .write_to(dir)
        .unwrap();

    project
        .tmplmerge()
        .args([
            "config",
            "--type",
            "settings",
            "-o",
            ".claude/settings.json",
            "base/settings.json",
            "overlays/web/settings.json",
        ])
        .assert()
        .success()
        .stdout("Merged 2 config(s) -> .claude/settings.json\n");

    assert_eq!(
        project.read_json(".claude/settings.json"),
        json!({"permissions": {"allow": ["Read", "Edit", "Bash(npm:*)"]}})
    );
    assert!(project.read(".claude/settings.json").ends_with("}\n"));
}

/// The existing output used as base keeps local additions
#[test]
fn test_settings_merge_with_base_keeps_local_keys() {
    let project = TestProject::new().unwrap();
    let dir = project.project_path();
    JsonFixture::raw(".claude/settings.json", json!({"env": {"LOCAL": "1"}, "permissions": {"allow": ["Local"]}}))
        .write_to(dir)
        .unwrap();
    JsonFixture::settings("base/settings.json", &["Read"])
        .write_to(dir)
        .unwrap();

    project
        .tmplmerge()
        .args([
            "config",
            "--type",
            "settings",
            "--base",
            ".claude/settings.json",
            "--output",
            ".claude/settings.json",
            "base/settings.json",
        ])
        .assert()
        .success();

    assert_eq!(
        project.read_json(".claude/settings.json"),
        json!({"env": {"LOCAL": "1"}, "permissions": {"allow": ["Local", "Read"]}})
    );
}

/// Missing overlays are skipped and noted in the summary
#[test]
fn test_config_missing_overlay_skipped() {
    let project = TestProject::new().unwrap();
    JsonFixture::settings("a.json", &["Read"])
        .write_to(project.project_path())
        .unwrap();

    project
        .tmplmerge()
        .args(["config", "--type", "settings", "-o", "out.json", "a.json", "missing.json"])
        .assert()
        .success()
        .stdout("Merged 1 config(s) -> out.json (1 missing skipped)\n");

    assert_eq!(project.read_json("out.json"), json!({"permissions": {"allow": ["Read"]}}));
}

/// MCP servers are unioned by name and env var comments aggregated
#[test]
fn test_mcp_merge_distinct_servers() {
    let project = TestProject::new().unwrap();
    let dir = project.project_path();
    JsonFixture::mcp("base/mcp.json", &["github"], Some("Required env vars: GITHUB_TOKEN, FOO."))
        .write_to(dir)
        .unwrap();
    JsonFixture::mcp("web/mcp.json", &["playwright"], Some("Required env vars: none"))
        .write_to(dir)
        .unwrap();

    project
        .tmplmerge()
        .args(["config", "--type", "mcp", "-o", ".mcp.json", "base/mcp.json", "web/mcp.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning").not());

    let merged = project.read_json(".mcp.json");
    let servers = merged["mcpServers"].as_object().unwrap();
    assert_eq!(servers.keys().collect::<Vec<_>>(), ["github", "playwright"]);
    assert_eq!(merged["_comment"], "Required env vars: FOO, GITHUB_TOKEN");
}

/// A server defined twice warns and keeps the later definition
#[test]
fn test_mcp_merge_collision_warns() {
    let project = TestProject::new().unwrap();
    let dir = project.project_path();
    JsonFixture::mcp("a.json", &["github"], None).write_to(dir).unwrap();
    JsonFixture::mcp("b.json", &["github"], None).write_to(dir).unwrap();

    project
        .tmplmerge()
        .args(["config", "--type", "mcp", "-o", ".mcp.json", "a.json", "b.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: MCP server 'github' defined in multiple configs. Using definition from b.json.",
        ));

    let merged = project.read_json(".mcp.json");
    assert_eq!(merged["mcpServers"]["github"]["args"][1], "--from=b.json");
    assert!(merged.get("_comment").is_none());
}

/// Malformed overlay stops the merge before anything is written
#[test]
fn test_config_invalid_json_fails_without_output() {
    let project = TestProject::new().unwrap();
    project.write("bad.json", "{\"mcpServers\": ").unwrap();

    project
        .tmplmerge()
        .args(["config", "--type", "mcp", "-o", ".mcp.json", "bad.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON in bad.json"));

    FileAssert::not_exists(project.path(".mcp.json"));
}
