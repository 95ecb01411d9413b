use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn lists_registry_in_registration_order() {
    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir("tests/fixtures/platform")
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("Services (3):"))
        .stdout(predicate::str::contains("  api (typescript) - 2 files at services/api"))
        .stdout(predicate::str::contains("    provides:   test-cases, workflows"))
        .stdout(predicate::str::contains(
            "  orchestrator (python) - 3 files at services/orchestrator",
        ))
        .stdout(predicate::str::contains("    depends on: api, reports (optional)"))
        .stdout(predicate::str::contains("  reports (go) - 1 files at services/reports"));
}

#[test]
fn services_json() {
    let output = Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir("tests/fixtures/platform")
        .args(["services", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let services: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = services
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["api", "orchestrator", "reports"]);
    assert_eq!(services[1]["depends_on"][1]["requirement"], "optional");
    assert_eq!(services[2]["language"], "go");
}
