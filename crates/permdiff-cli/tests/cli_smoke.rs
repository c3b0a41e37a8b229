use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PROFILE_A: &str = "<Profile><userPermissions><enabled>true</enabled><name>ModifyAllData</name></userPermissions></Profile>";
const PROFILE_B: &str = "<Profile><custom>false</custom></Profile>";
const PERMISSION_SET: &str = "<PermissionSet><label>Ops</label></PermissionSet>";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../permdiff-core/tests/fixtures").join(name)
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create tempdir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write input");
    }
    dir
}

fn permdiff(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("permdiff").expect("binary builds");
    cmd.current_dir(dir.path()).env_remove("PERMDIFF_LOG");
    cmd
}

#[test]
fn writes_html_report_into_working_directory() {
    let dir = workspace(&[
        ("Admin.profile-meta.xml", PROFILE_A),
        ("Standard.profile-meta.xml", PROFILE_B),
    ]);
    permdiff(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Comparison report written to comparison_report.html"))
        .stderr(predicate::str::contains("Detected both files as Profiles."))
        .stderr(predicate::str::contains("Comparing"));

    let html = fs::read_to_string(dir.path().join("comparison_report.html")).unwrap();
    assert!(html.contains("<th>Only in Admin</th><th>Only in Standard</th>"));
    assert!(html.contains("&lt;userPermissions&gt; ModifyAllData"));
}

#[test]
fn explicit_inputs_and_json_output() {
    let dir = workspace(&[]);
    permdiff(&dir)
        .args(["--format", "json", "-o", "report.json", "-q"])
        .arg(fixture("Admin.profile-meta.xml"))
        .arg(fixture("Standard.profile-meta.xml"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(json["left"], "Admin");
    assert_eq!(json["right"], "Standard");
    assert_eq!(json["totals"]["differing"], 3);
}

#[test]
fn three_inputs_fail_without_writing() {
    let dir = workspace(&[
        ("a.xml", PROFILE_A),
        ("b.xml", PROFILE_B),
        ("c.xml", PROFILE_B),
    ]);
    permdiff(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: cannot produce comparison_report.html: "))
        .stderr(predicate::str::contains("expected exactly two XML files"))
        .stderr(predicate::str::contains("found 3"));
    assert!(!dir.path().join("comparison_report.html").exists());
}

#[test]
fn empty_directory_is_rejected() {
    let dir = workspace(&[("notes.txt", "not xml")]);
    permdiff(&dir).assert().code(1).stderr(predicate::str::contains("found 0"));
}

#[test]
fn unknown_document_type_is_rejected() {
    let dir = workspace(&[("a.xml", PROFILE_A), ("b.xml", "<CustomObject/>")]);
    permdiff(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not recognized as a Profile or PermissionSet"));
    assert!(!dir.path().join("comparison_report.html").exists());
}

#[test]
fn mixed_document_types_are_rejected() {
    let dir = workspace(&[("a.xml", PROFILE_A), ("b.xml", PERMISSION_SET)]);
    permdiff(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mismatched types"));
}

#[test]
fn malformed_document_is_reported() {
    let dir = workspace(&[("a.xml", PROFILE_A), ("b.xml", "<Profile><custom></Profile>")]);
    permdiff(&dir).assert().code(1).stderr(predicate::str::contains("failed to load"));
}

#[test]
fn dir_flag_selects_input_directory() {
    let inputs = workspace(&[("a.xml", PERMISSION_SET), ("b.xml", PERMISSION_SET)]);
    let out = workspace(&[]);
    permdiff(&out)
        .arg("--dir")
        .arg(inputs.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Detected both files as PermissionSets."));
    assert!(out.path().join("comparison_report.html").exists());
}

#[test]
fn single_positional_input_is_rejected() {
    let dir = workspace(&[("a.xml", PROFILE_A)]);
    permdiff(&dir)
        .arg("a.xml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected FILE1 and FILE2"));
}

#[test]
fn help_lists_flags() {
    let dir = workspace(&[]);
    permdiff(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--log-json"));
}

#[test]
fn unknown_flag_uses_usage_exit_code() {
    let dir = workspace(&[]);
    permdiff(&dir).arg("--bogus").assert().code(2);
}
