use predicates::prelude::*;
use serde_json::json;
use tmplmerge::test_utils::JsonFixture;

use crate::common::TestProject;

/// Donor agents with new names are appended; skills replaced; MCP kept
#[test]
fn test_catalog_merge() {
    let project = TestProject::new().unwrap();
    let dir = project.project_path();
    JsonFixture::catalog("external-catalog.json", &["planner"], &["old-skill"], &["gemini-search"])
        .write_to(dir)
        .unwrap();
    JsonFixture::catalog("donor.json", &["planner", "reviewer"], &["tdd"], &["github"])
        .write_to(dir)
        .unwrap();

    project
        .tmplmerge()
        .args(["catalog", "--target", "external-catalog.json", "--donor", "donor.json"])
        .assert()
        .success()
        .stdout("Merged 1 agent(s) from donor.json into external-catalog.json\n");

    assert_eq!(
        project.read_json("external-catalog.json"),
        json!({
            "components": {
                "agents": [{"name": "planner"}, {"name": "reviewer"}],
                "skills": [{"name": "tdd"}],
                "plugins": [],
                "mcp-servers": [{"name": "gemini-search"}]
            }
        })
    );
}

/// Catalog without components is rejected and the target left alone
#[test]
fn test_catalog_missing_components() {
    let project = TestProject::new().unwrap();
    project.write("target.json", "{\"version\": 1}").unwrap();
    JsonFixture::catalog("donor.json", &["a"], &[], &[])
        .write_to(project.project_path())
        .unwrap();

    project
        .tmplmerge()
        .args(["catalog", "--target", "target.json", "--donor", "donor.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("components"));

    assert_eq!(project.read("target.json"), "{\"version\": 1}");
}
