use assert_cmd::Command;
use predicates::prelude::*;

fn run_in(root: &std::path::Path) -> assert_cmd::assert::Assert {
    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(root)
        .args(["check", "--quiet"])
        .assert()
}

fn write_config(root: &std::path::Path, body: &str) {
    std::fs::write(root.join(".crossdeps.toml"), body).unwrap();
}

#[test]
fn unknown_declared_dependency_aborts_before_report() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(
        tmp.path(),
        r#"
[[services]]
name = "api"
language = "typescript"
root = "api"
depends_on = ["billing"]
"#,
    );

    run_in(tmp.path())
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("billing"))
        .stderr(predicate::str::contains("No analysis was performed"));
}

#[test]
fn overlapping_selectors_abort() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("services/api/worker")).unwrap();
    std::fs::write(root.join("services/api/worker/run.py"), "import os\n").unwrap();
    write_config(
        root,
        r#"
[[services]]
name = "api"
language = "python"
root = "services/api"

[[services]]
name = "worker"
language = "python"
root = "services/api/worker"
"#,
    );

    run_in(root)
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("worker"));
}

#[test]
fn unknown_keys_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(
        tmp.path(),
        r#"
[[services]]
name = "api"
language = "go"
root = "api"
dependson = ["x"]
"#,
    );

    run_in(tmp.path())
        .code(2)
        .stderr(predicate::str::contains("dependson"));
}

#[test]
fn missing_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(tmp.path())
        .args(["check", "--quiet", "--config", "nowhere.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nowhere.toml"))
        .stderr(predicate::str::contains("No analysis was performed"));
}

#[test]
fn config_toggles_select_checks() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("a")).unwrap();
    std::fs::create_dir_all(root.join("b")).unwrap();
    std::fs::write(root.join("a/main.go"), "package a\nvar _ = client.Get(\"/b-api\")\n").unwrap();
    std::fs::write(root.join("b/main.go"), "package b\nvar _ = client.Get(\"/a-api\")\n").unwrap();
    write_config(
        root,
        r#"
[analysis]
boundaries = false
circular = false
polyglot = true
cross_service = false

[[services]]
name = "a"
language = "go"
root = "a"
provides = ["a-api"]
depends_on = ["b"]

[[services]]
name = "b"
language = "go"
root = "b"
provides = ["b-api"]
depends_on = ["a"]
"#,
    );

    // Cycle exists, but only the polyglot check is enabled.
    run_in(root)
        .success()
        .stdout(predicate::str::contains("Circular Dependencies").not());

    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(root)
        .args(["check", "--circular", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("  a -> b -> a"));
}
