use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = "tests/fixtures/platform";

fn crossdeps() -> Command {
    let mut cmd = Command::cargo_bin("crossdeps").unwrap();
    cmd.current_dir(FIXTURE);
    cmd
}

#[test]
fn reports_undeclared_dependency_and_cycle() {
    crossdeps()
        .args(["check", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Crossdeps Dependency Report"))
        .stdout(predicate::str::contains("Result:    FAIL"))
        .stdout(predicate::str::contains("  ❌ orchestrator (jobs)"))
        .stdout(predicate::str::contains("  ✅ api (workflows)"))
        .stdout(predicate::str::contains("  ✅ api (test-cases)"))
        .stdout(predicate::str::contains("Missing Dependencies"))
        .stdout(predicate::str::contains("  api -> orchestrator (jobs)"))
        .stdout(predicate::str::contains("Circular Dependencies"))
        .stdout(predicate::str::contains("  api -> orchestrator -> api"))
        .stdout(predicate::str::contains("Unused Declarations"))
        .stdout(predicate::str::contains("  orchestrator -> reports (optional)"));
}

#[test]
fn unresolved_calls_are_listed_not_fatal() {
    crossdeps()
        .args(["check", "--polyglot", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Polyglot Summary"))
        .stdout(predicate::str::contains("Unresolved Calls"))
        .stdout(predicate::str::contains("services/api/src/index.ts:13  /health"))
        .stdout(predicate::str::contains("Missing Dependencies").not());
}

#[test]
fn test_sources_are_excluded_by_default() {
    // jobs.test.ts calls /reports/daily; no api -> reports edge may appear.
    crossdeps()
        .args(["check", "--cross-service", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("❌ reports").not());
}

#[test]
fn boundaries_pass_when_services_only_talk_over_apis() {
    crossdeps()
        .args(["check", "--boundaries", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boundary Violations\n-------------------\n  None"));
}

#[test]
fn path_restricts_scan_and_lists_skipped_services() {
    crossdeps()
        .args([
            "check",
            "--path",
            "services/reports",
            "--cross-service",
            "--circular",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result:    PASS"))
        .stdout(predicate::str::contains("  ✅ api (test-cases)"))
        .stdout(predicate::str::contains("Skipped Services"))
        .stdout(predicate::str::contains("  api (no files under the requested path)"))
        .stdout(predicate::str::contains("  orchestrator (no files under the requested path)"));
}

#[test]
fn json_report() {
    let output = crossdeps()
        .args(["check", "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["edges"].as_array().unwrap().len(), 3);

    let violations = report["cross_service"]["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["from"], "api");
    assert_eq!(violations[0]["to"], "orchestrator");

    assert_eq!(
        report["circular"]["cycles"][0],
        serde_json::json!(["api", "orchestrator", "api"])
    );
    assert_eq!(report["self_calls"][0]["matched_api"], "jobs");
    assert_eq!(report["boundaries"]["valid"], true);
}

#[test]
fn mermaid_diagram_on_stdout() {
    crossdeps()
        .args(["check", "--circular", "--diagram", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("graph LR"))
        .stdout(predicate::str::contains("subgraph lang_python[\"python\"]"))
        .stdout(predicate::str::contains("s1[\"orchestrator\"]"))
        .stdout(predicate::str::contains("s0 -.->|\"1 APIs\"| s1"))
        .stdout(predicate::str::contains("s1 -->|\"1 APIs\"| s0"))
        .stdout(predicate::str::contains("s2 -->|\"1 APIs\"| s0"));
}

#[test]
fn report_and_diagram_to_files() {
    let out = tempfile::tempdir().unwrap();
    let report_path = out.path().join("report.txt");
    let diagram_path = out.path().join("services.dot");

    crossdeps()
        .args(["check", "--quiet", "--diagram-format", "dot", "--output"])
        .arg(&report_path)
        .arg("--diagram-output")
        .arg(&diagram_path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Missing Dependencies"));

    let diagram = std::fs::read_to_string(&diagram_path).unwrap();
    assert!(diagram.starts_with("digraph services {"));
    assert!(diagram.contains("subgraph cluster_go"));
    assert!(diagram.contains(
        "\"api\" -> \"orchestrator\" [label=\"1 APIs\", style=dashed, color=red];"
    ));
}

#[test]
fn unwritable_output_is_not_a_config_error() {
    let out = tempfile::tempdir().unwrap();
    let report_path = out.path().join("missing-dir").join("report.txt");

    crossdeps()
        .args(["check", "--quiet", "--output"])
        .arg(&report_path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No analysis was performed").not());
}

#[test]
fn output_is_deterministic() {
    let run = || {
        crossdeps()
            .args(["check", "--diagram", "--quiet"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(!first.is_empty());
    for _ in 0..3 {
        assert_eq!(run(), first);
    }

    let run_json = || {
        crossdeps()
            .args(["check", "--format", "json", "--quiet"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run_json(), run_json());
}

#[test]
fn explicit_config_from_another_directory() {
    let config = std::path::Path::new(FIXTURE)
        .join(".crossdeps.toml")
        .canonicalize()
        .unwrap();
    let elsewhere = tempfile::tempdir().unwrap();

    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(elsewhere.path())
        .args(["check", "--circular", "--quiet", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("api -> orchestrator -> api"));
}

#[test]
fn declared_direction_is_not_conflated_with_reverse() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::write(
        root.join(".crossdeps.toml"),
        r#"
[[services]]
name = "api"
language = "typescript"
root = "services/api"
provides = ["test-cases", "workflows"]

[[services]]
name = "orchestrator"
language = "python"
root = "services/orchestrator"
provides = ["jobs"]
depends_on = ["api"]
"#,
    )
    .unwrap();
    std::fs::create_dir_all(root.join("services/api")).unwrap();
    std::fs::create_dir_all(root.join("services/orchestrator")).unwrap();
    std::fs::write(root.join("services/api/server.ts"), "export const port = 3000;\n").unwrap();
    std::fs::write(
        root.join("services/orchestrator/client.py"),
        "import requests\nrequests.get(\"http://api:3000/workflows/7\")\n",
    )
    .unwrap();

    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(root)
        .args(["check", "--cross-service", "--circular", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  ✅ api (workflows)"))
        .stdout(predicate::str::contains("Missing Dependencies\n--------------------\n  None"));
}

#[test]
fn boundary_violation_fails_the_check() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::write(
        root.join(".crossdeps.toml"),
        r#"
[[services]]
name = "api"
language = "typescript"
root = "services/api"

[[services]]
name = "orchestrator"
language = "typescript"
root = "services/orchestrator"
"#,
    )
    .unwrap();
    std::fs::create_dir_all(root.join("services/api/src")).unwrap();
    std::fs::create_dir_all(root.join("services/orchestrator/src")).unwrap();
    std::fs::write(
        root.join("services/api/src/index.ts"),
        "import { Job } from '../../orchestrator/src/models';\n",
    )
    .unwrap();
    std::fs::write(
        root.join("services/orchestrator/src/models.ts"),
        "export interface Job { id: string }\n",
    )
    .unwrap();

    Command::cargo_bin("crossdeps")
        .unwrap()
        .current_dir(root)
        .args(["check", "--boundaries", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "  api -> orchestrator  services/api/src/index.ts:1  imports \"../../orchestrator/src/models\"",
        ));
}
