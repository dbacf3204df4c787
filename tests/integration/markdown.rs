use predicates::prelude::*;
use tmplmerge::constants::{MARKER_END, MARKER_START};
use tmplmerge::test_utils::MarkdownFixture;

use crate::common::{FileAssert, TestProject};

/// First installation: no existing document, base copied unchanged
#[test]
fn test_markdown_copies_base_without_existing() {
    let project = TestProject::new().unwrap();
    let base = MarkdownFixture::base_template();
    base.write_to(project.project_path()).unwrap();

    project
        .tmplmerge()
        .args(["markdown", "--base", "base.md", "--existing", "CLAUDE.md", "-o", "out/CLAUDE.md"])
        .assert()
        .success()
        .stdout("Copied: base.md -> out/CLAUDE.md\n");

    FileAssert::equals(project.path("out/CLAUDE.md"), &base.content);
}

/// Existing document: managed sections replaced, custom ones nested
#[test]
fn test_markdown_merges_existing_document() {
    let project = TestProject::new().unwrap();
    let base = MarkdownFixture::base_template();
    base.write_to(project.project_path()).unwrap();
    MarkdownFixture::existing_with_custom()
        .write_to(project.project_path())
        .unwrap();

    project
        .tmplmerge()
        .args(["markdown", "--base", "base.md", "--existing", "CLAUDE.md", "--output", "CLAUDE.md"])
        .assert()
        .success()
        .stdout("Merged: base.md + CLAUDE.md -> CLAUDE.md\n");

    let expected = format!(
        "{MARKER_START}\n{}\n{MARKER_END}\n\n## Project-Specific\n\n### Deployment\nRun `make ship`.\n\n### Team Contacts\nAsk in the ops room.\n",
        base.content.trim_end()
    );
    FileAssert::equals(project.path("CLAUDE.md"), &expected);
}

/// Re-merging keeps one managed block and carries custom sections through
#[test]
fn test_markdown_remerge_keeps_custom_sections() {
    let project = TestProject::new().unwrap();
    let base = MarkdownFixture::base_template();
    base.write_to(project.project_path()).unwrap();
    MarkdownFixture::existing_with_custom()
        .write_to(project.project_path())
        .unwrap();

    let args = ["markdown", "--base", "base.md", "--existing", "CLAUDE.md", "-o", "CLAUDE.md"];
    project.tmplmerge().args(args).assert().success();
    let first = project.read("CLAUDE.md");
    project.tmplmerge().args(args).assert().success();
    let second = project.read("CLAUDE.md");

    let managed = format!("{MARKER_START}\n{}\n{MARKER_END}\n", base.content.trim_end());
    assert!(second.starts_with(&managed));
    assert_eq!(second.matches(MARKER_START).count(), 1);
    assert!(second.contains("### Deployment\nRun `make ship`.\n"));
    assert!(second.contains("### Team Contacts\nAsk in the ops room.\n"));
    assert!(first.split_whitespace().eq(second.split_whitespace()));
}

/// Empty existing document: managed block written, summary says copied
#[test]
fn test_markdown_empty_existing_is_copy() {
    let project = TestProject::new().unwrap();
    let base = MarkdownFixture::base_template();
    base.write_to(project.project_path()).unwrap();
    project.write("CLAUDE.md", "").unwrap();

    project
        .tmplmerge()
        .args(["markdown", "--base", "base.md", "--existing", "CLAUDE.md", "-o", "CLAUDE.md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Copied:"));

    let expected = format!("{MARKER_START}\n{}\n{MARKER_END}\n", base.content.trim_end());
    FileAssert::equals(project.path("CLAUDE.md"), &expected);
}

/// Quiet mode prints nothing on success
#[test]
fn test_markdown_quiet() {
    let project = TestProject::new().unwrap();
    MarkdownFixture::base_template()
        .write_to(project.project_path())
        .unwrap();

    project
        .tmplmerge()
        .args(["-q", "markdown", "--base", "base.md", "-o", "CLAUDE.md"])
        .assert()
        .success()
        .stdout("");

    FileAssert::exists(project.path("CLAUDE.md"));
}

/// The TOML configuration changes which headings the template owns
#[test]
fn test_markdown_config_file_managed_headers() {
    let project = TestProject::new().unwrap();
    project
        .write("base.md", "# Project Guidelines\n\n## Deployment\nShared steps.\n")
        .unwrap();
    project
        .write("CLAUDE.md", "## Deployment\nLocal steps.\n\n## Security\nLocal rules.\n")
        .unwrap();
    project
        .write("tmplmerge.toml", "[markdown]\nmanaged_headers = [\"Deployment\"]\n")
        .unwrap();

    project
        .tmplmerge()
        .args(["markdown", "--base", "base.md", "--existing", "CLAUDE.md", "-o", "CLAUDE.md"])
        .env("TMPLMERGE_CONFIG", "tmplmerge.toml")
        .assert()
        .success();

    let merged = project.read("CLAUDE.md");
    assert!(merged.contains("Shared steps."));
    assert!(!merged.contains("Local steps."));
    assert!(merged.contains("### Security\nLocal rules.\n"));
}
