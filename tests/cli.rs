//! Command-line contract: arguments, exit codes and the cp.txt format.

use panelflow::output::read_cp;
use panelflow::SurfaceLoc;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("panelflow-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn panelflow() -> Command {
    Command::new(env!("CARGO_BIN_EXE_panelflow"))
}

#[test]
fn test_naca_run_writes_cp_file() {
    let output = scratch("naca").join("deep").join("tree");
    let status = panelflow()
        .args(["--naca", "0012", "--n", "100", "--alpha", "4.0", "--output"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(output.join("cp.txt")).unwrap();
    assert_eq!(text.lines().count(), 100);
    for line in text.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 4, "{line}");
        assert!(fields[0] == "upper" || fields[0] == "lower");
    }

    let records = read_cp(&output.join("cp.txt")).unwrap();
    assert_eq!(records[0].loc, SurfaceLoc::Upper);
    assert_eq!(records[99].loc, SurfaceLoc::Lower);

    let _ = fs::remove_dir_all(scratch("naca"));
}

#[test]
fn test_defaults_give_forty_panels() {
    let output = scratch("defaults");
    let status = panelflow()
        .args(["--naca", "2412", "--output"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_cp(&output.join("cp.txt")).unwrap().len(), 40);
    let _ = fs::remove_dir_all(&output);
}

#[test]
fn test_input_file_with_skiprows() {
    let output = scratch("input");
    let input = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/naca0012.dat");
    let status = panelflow()
        .args(["-n", "50", "--skiprows", "1", "--method", "source", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_cp(&output.join("cp.txt")).unwrap().len(), 50);
    let _ = fs::remove_dir_all(&output);
}

#[test]
fn test_open_trailing_edge_run() {
    let output = scratch("open");
    let status = panelflow()
        .args(["--naca", "0012", "--n", "60", "--open-trailing-edge", "--output"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    let records = read_cp(&output.join("cp.txt")).unwrap();
    assert_eq!(records.len(), 60);
    assert_eq!(records[59].loc, SurfaceLoc::Lower);
    let _ = fs::remove_dir_all(&output);
}

#[test]
fn test_negative_incidence_is_accepted() {
    let output = scratch("negative");
    let status = panelflow()
        .args(["--naca", "0012", "--alpha", "-3", "--output"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    let _ = fs::remove_dir_all(&output);
}

#[test]
fn test_two_panels_fail() {
    let output = scratch("two");
    let result = panelflow()
        .args(["--naca", "0012", "--n", "2", "--output"])
        .arg(&output)
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid geometry"), "{stderr}");
    assert!(!output.join("cp.txt").exists());
}

#[test]
fn test_missing_geometry_source_fails() {
    let result = panelflow().args(["--n", "40"]).output().unwrap();
    assert!(!result.status.success());
}

#[test]
fn test_conflicting_geometry_sources_fail() {
    let result = panelflow()
        .args(["--naca", "0012", "--input", "foil.dat"])
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("choose one"));
}

#[test]
fn test_unknown_method_fails() {
    let result = panelflow()
        .args(["--naca", "0012", "--method", "vortex"])
        .output()
        .unwrap();
    assert!(!result.status.success());
}

#[test]
fn test_sweep_binary() {
    let root = scratch("sweep");
    fs::create_dir_all(&root).unwrap();
    let config = root.join("sweep.json");
    let cases: Vec<String> = [0.0, 4.0]
        .iter()
        .map(|alpha| {
            format!(
                r#"{{"naca": "0012", "n": 60, "alpha": {alpha}, "output": "{}"}}"#,
                root.join(format!("alpha{alpha}")).display()
            )
        })
        .collect();
    fs::write(&config, format!(r#"{{"cases": [{}]}}"#, cases.join(","))).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_panelflow-sweep"))
        .arg("--config")
        .arg(&config)
        .arg("--summary-dir")
        .arg(&root)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(root.join("summary.json").exists());
    assert!(root.join("alpha4").join("cp.txt").exists());

    let _ = fs::remove_dir_all(&root);
}
