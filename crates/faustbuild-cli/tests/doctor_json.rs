//! Integration tests for `faustbuild --json doctor` output.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn faustbuild() -> Command {
    Command::new(env!("CARGO_BIN_EXE_faustbuild"))
}

#[test]
fn test_doctor_json_is_valid_json() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("faustbuild.json"),
        r#"{"compiler": "faust-that-does-not-exist", "faust2sc": "faust2sc-that-does-not-exist", "search_path": ["arch"]}"#,
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("arch")).unwrap();
    fs::write(dir.path().join("arch/module.cpp"), "").unwrap();

    let output = faustbuild()
        .arg("--json")
        .arg("--cwd")
        .arg(dir.path())
        .arg("doctor")
        .output()
        .expect("Failed to run doctor command");
    assert!(output.status.success(), "doctor failed: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["report_schema_version"].as_u64(), Some(1));
    assert!(json["runtime"].get("version").is_some(), "Missing runtime.version");
    assert_eq!(json["compiler"]["name"], "faust-that-does-not-exist");
    assert!(json["compiler"]["path"].is_null());

    let dirs = json["search_dirs"].as_array().expect("search_dirs array");
    assert_eq!(dirs.len(), 1);
    assert_eq!(dirs[0]["exists"], true);

    let matches = json["architecture"]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].as_str().unwrap().ends_with("module.cpp"));

    let codes: Vec<&str> = json["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["COMPILER_NOT_FOUND", "FAUST2SC_NOT_FOUND"]);
}

#[test]
fn test_doctor_human_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("faustbuild.json"), r#"{"search_path": []}"#).unwrap();

    let output = faustbuild()
        .arg("--cwd")
        .arg(dir.path())
        .arg("doctor")
        .output()
        .expect("Failed to run doctor command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("## Tools"));
    assert!(stdout.contains("## Search path"));
    assert!(stdout.contains("ARCHITECTURE_NOT_FOUND"));
}
