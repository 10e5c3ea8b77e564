//! Integration tests for `faustbuild deps`.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn faustbuild() -> Command {
    Command::new(env!("CARGO_BIN_EXE_faustbuild"))
}

#[test]
fn test_deps_transitive_with_depfile() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("faustbuild.json"), r#"{"search_path": []}"#).unwrap();
    fs::write(root.join("main.dsp"), r#"import("a.lib");"#).unwrap();
    fs::write(root.join("a.lib"), r#"import("b.lib"); import("main.dsp");"#).unwrap();
    fs::write(root.join("b.lib"), r#"import("a.lib"); import("gone.lib");"#).unwrap();

    let output = faustbuild()
        .arg("--json")
        .arg("--cwd")
        .arg(root)
        .args(["deps", "main.dsp", "--depfile", "main.d"])
        .output()
        .expect("Failed to run faustbuild");
    assert!(
        output.status.success(),
        "deps failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let deps: Vec<&str> = json["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(deps.len(), 2);
    assert!(deps[0].ends_with("a.lib"));
    assert!(deps[1].ends_with("b.lib"));

    let unresolved = json["unresolved"].as_array().unwrap();
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0]["token"]["name"], "gone.lib");

    let depfile = fs::read_to_string(root.join("main.d")).unwrap();
    let first_line = depfile.lines().next().unwrap();
    assert!(first_line.ends_with("main.cpp: \\"), "unexpected depfile: {depfile}");
    assert!(depfile.contains("a.lib"));
    assert!(depfile.contains("b.lib"));
}

#[test]
fn test_deps_explicit_target() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("faustbuild.json"), r#"{"search_path": []}"#).unwrap();
    fs::write(root.join("main.dsp"), "process = _;").unwrap();

    let output = faustbuild()
        .arg("--cwd")
        .arg(root)
        .args(["deps", "main.dsp", "--depfile", "out.d", "--target", "build/main.dsp.xml"])
        .output()
        .expect("Failed to run faustbuild");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(root.join("out.d")).unwrap(),
        "build/main.dsp.xml:\n"
    );
}
