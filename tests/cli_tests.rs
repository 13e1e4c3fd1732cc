//! CLI integration tests using the real atinclude binary

mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::*;

#[allow(deprecated)]
fn atinclude_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("atinclude").unwrap();
    cmd.current_dir(&workspace.path)
        .env_remove("RUST_LOG")
        .env_remove("ATINCLUDE_DESTINATION");
    cmd
}

#[test]
fn test_help_output() {
    let workspace = TestWorkspace::new();
    atinclude_cmd(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--omit-source-parent"))
        .stdout(predicate::str::contains("--include-recursive"))
        .stdout(predicate::str::contains("@@include('partials/header.html')"));
}

#[test]
fn test_default_run_writes_roots_only() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1, File errors: 0"));

    assert_eq!(workspace.read_file("build/index.html"), "<body><h1>Hi</h1></body>");
    assert!(!workspace.file_exists("build/partials/header.html"));
}

#[test]
fn test_keep_source_parent() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-o", "false"])
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("build/src/index.html"),
        "<body><h1>Hi</h1></body>"
    );
    assert!(!workspace.file_exists("build/index.html"));
}

#[test]
fn test_custom_destination() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-d", "dist/site"])
        .assert()
        .success();

    assert!(workspace.file_exists("dist/site/index.html"));
    assert!(!workspace.file_exists("build"));
}

#[test]
fn test_non_recursive_leaves_nested_directives() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/index.html", "[@@include('layout.html')]");
    workspace.write_file("src/layout.html", "(@@include('nav.html'))");
    workspace.write_file("src/nav.html", "nav");

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-r", "false"])
        .assert()
        .success();
    assert_eq!(
        workspace.read_file("build/index.html"),
        "[(@@include('nav.html'))]"
    );

    atinclude_cmd(&workspace)
        .args(["-s", "src"])
        .assert()
        .success();
    assert_eq!(workspace.read_file("build/index.html"), "[(nav)]");
}

#[test]
fn test_missing_include_placeholder() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/index.html", "<@@include('missing.html')>");

    atinclude_cmd(&workspace)
        .args(["-s", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1, File errors: 1"))
        .stderr(predicate::str::contains("File not found"));

    assert_eq!(
        workspace.read_file("build/index.html"),
        "<File not found: missing.html>"
    );
}

#[test]
fn test_missing_include_without_placeholder() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/index.html", "<@@include('missing.html')>");

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-p", "false"])
        .assert()
        .success();

    assert_eq!(
        workspace.read_file("build/index.html"),
        "<@@include('missing.html')>"
    );
}

#[test]
fn test_strict_fails_on_errors() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/index.html", "@@include('missing.html')");

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("File errors: 1"));
}

#[test]
fn test_strict_succeeds_without_errors() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--strict"])
        .assert()
        .success();
}

#[test]
fn test_cyclic_include_is_reported() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/index.html", "@@include('a.html')");
    workspace.write_file("src/a.html", "a@@include('b.html')");
    workspace.write_file("src/b.html", "b@@include('a.html')");

    atinclude_cmd(&workspace)
        .args(["-s", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1, File errors: 1"))
        .stderr(predicate::str::contains("Cyclic include"));

    assert_eq!(
        workspace.read_file("build/index.html"),
        "abCyclic include: a.html"
    );
}

#[test]
fn test_unreadable_source_is_counted() {
    let workspace = TestWorkspace::new();
    workspace.write_file("src/a.html", "a");
    workspace.create_dir("src/b.html");

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-i", "*.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1, File errors: 1"));
}

#[test]
fn test_silent_prints_nothing() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--silent"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(workspace.file_exists("build/index.html"));
}

#[test]
fn test_verbose_logs_written_files() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("File written"))
        .stderr(predicate::str::contains("Skipping fragment"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry run] Files written: 1"));

    assert!(!workspace.file_exists("build"));
}

#[test]
fn test_list_plain() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html ->"))
        .stdout(predicate::str::contains("header.html").not());

    assert!(!workspace.file_exists("build"));
}

#[test]
fn test_list_json() {
    let workspace = TestWorkspace::new().with_site();

    let output = atinclude_cmd(&workspace)
        .args(["-s", "src", "--list=json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let infos: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let infos = infos.as_array().unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0]["kind"], "root");
    assert_eq!(infos[0]["includes"][0], "partials/header.html");
    assert!(infos[0]["output"].as_str().unwrap().ends_with("index.html"));
    assert_eq!(infos[1]["kind"], "fragment");
    assert!(infos[1].get("output").is_none());
}

#[test]
fn test_exclude_pattern() {
    let workspace = TestWorkspace::new().with_site();
    workspace.write_file("src/drafts/wip.html", "wip");

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-x", "drafts/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1"));

    assert!(!workspace.file_exists("build/drafts/wip.html"));
}

#[test]
fn test_invalid_exclude_pattern() {
    let workspace = TestWorkspace::new().with_site();

    atinclude_cmd(&workspace)
        .args(["-s", "src", "-x", "["])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid exclude pattern"));
}

#[test]
fn test_missing_source_directory_fails() {
    let workspace = TestWorkspace::new();

    atinclude_cmd(&workspace)
        .args(["-s", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_multiple_sources() {
    let workspace = TestWorkspace::new();
    workspace.write_file("pages/index.html", "@@include('../shared/footer.html')");
    workspace.write_file("shared/footer.html", "footer");

    atinclude_cmd(&workspace)
        .args(["-s", "pages", "shared"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written: 1, File errors: 0"));

    assert_eq!(workspace.read_file("build/index.html"), "footer");
    assert!(!workspace.file_exists("build/footer.html"));
}
