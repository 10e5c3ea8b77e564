//! Integration tests for `faustbuild --json plan`.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn faustbuild() -> Command {
    Command::new(env!("CARGO_BIN_EXE_faustbuild"))
}

#[test]
fn test_plan_json_nodes_and_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("arch")).unwrap();
    fs::create_dir_all(root.join("synths")).unwrap();
    fs::write(
        root.join("faustbuild.json"),
        r#"{"search_path": ["arch"], "flags": ["-vec"], "faust2sc_prefix": "Faust"}"#,
    )
    .unwrap();
    fs::write(root.join("arch/module.cpp"), "").unwrap();
    fs::write(root.join("synths/pad.dsp"), r#"import("osc.lib");"#).unwrap();
    fs::write(root.join("synths/osc.lib"), "").unwrap();
    fs::write(root.join("synths/bass.dsp"), "process = _;").unwrap();

    let output = faustbuild()
        .arg("--json")
        .arg("--cwd")
        .arg(root)
        .args(["plan", "synths", "--rule", "cpp,sc", "--sc-target", "Plugins.sc"])
        .output()
        .expect("Failed to run faustbuild");
    assert!(
        output.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["schema_version"], 1);
    assert!(json["notes"].as_array().unwrap().is_empty());

    let nodes = json["nodes"].as_array().unwrap();
    let rules: Vec<&str> = nodes.iter().map(|n| n["rule"].as_str().unwrap()).collect();
    assert_eq!(rules, vec!["cpp", "cpp", "supercollider", "xml", "xml"]);

    let pad_cpp = nodes
        .iter()
        .find(|n| n["rule"] == "cpp" && n["target"].as_str().unwrap().ends_with("pad.cpp"))
        .expect("pad.cpp node");
    let inputs: Vec<&str> = pad_cpp["inputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i.as_str().unwrap())
        .collect();
    assert_eq!(inputs.len(), 2);
    assert!(inputs.iter().any(|i| i.ends_with("module.cpp")));
    assert!(inputs.iter().any(|i| i.ends_with("osc.lib")));

    let args: Vec<&str> = pad_cpp["steps"][0]["command"]["args"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap())
        .collect();
    assert_eq!(args[..3], ["-vec", "-a", "module.cpp"]);

    let sc = nodes.iter().find(|n| n["rule"] == "supercollider").unwrap();
    assert!(sc["target"].as_str().unwrap().ends_with("Plugins.sc"));
    assert_eq!(sc["sources"].as_array().unwrap().len(), 2);
    assert_eq!(sc["deps"].as_array().unwrap().len(), 2);
    assert_eq!(sc["steps"][0]["command"]["program"], "faust2sc");
    assert_eq!(sc["steps"][0]["command"]["args"][1], "--prefix=Faust");
}

#[test]
fn test_plan_rejects_unknown_rule() {
    let dir = tempdir().unwrap();
    let output = faustbuild()
        .arg("--cwd")
        .arg(dir.path())
        .args(["plan", "--rule", "wasm"])
        .output()
        .expect("Failed to run faustbuild");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("wasm"));
}

#[test]
fn test_plan_human_output_lists_steps() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("faustbuild.json"), r#"{"search_path": []}"#).unwrap();
    fs::write(root.join("tone.dsp"), "process = _;").unwrap();

    let output = faustbuild()
        .arg("--cwd")
        .arg(root)
        .args(["plan", "tone.dsp", "--rule", "svg"])
        .output()
        .expect("Failed to run faustbuild");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("svg:"));
    assert!(stdout.contains("-svg"));
}
