use std::fs;
use std::process::Command;

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    fs::write(dir.path().join("sub/b.txt"), "b\n").unwrap();
    dir
}

#[test]
fn lists_entries_and_prints_summary() {
    let dir = sample_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .arg(dir.path())
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let root = dir.path().display().to_string();
    assert!(stdout.contains(&format!("[DIR] {root}\n")));
    assert!(stdout.contains(&format!("[REG] {root}/a.txt\n")));
    assert!(stdout.contains(&format!("[DIR] {root}/sub\n")));
    assert!(stdout.contains(&format!("[REG] {root}/sub/b.txt\n")));
    assert_eq!(stdout.lines().count(), 4);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Total: 4 nodes, 2 directories, 2 others"));
}

#[test]
fn defaults_to_current_directory() {
    let dir = sample_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .current_dir(dir.path())
        .output()
        .expect("run binary");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[DIR] .\n"));
    assert!(stdout.contains("[REG] ./sub/b.txt\n"));
}

#[test]
fn json_output_has_entries_and_summary() {
    let dir = sample_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .arg(dir.path())
        .arg("--json")
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["kind"], "DIR");
    let summary = &lines[4];
    assert_eq!(summary["nodes"], 4);
    assert_eq!(summary["dirs"], 2);
    assert_eq!(summary["others"], 2);
    assert_eq!(summary["errors"], 0);
}

#[test]
fn missing_path_fails_but_walks_the_rest() {
    let dir = sample_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .arg(dir.path().join("nope"))
        .arg(dir.path())
        .arg("--summary-only")
        .output()
        .expect("run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope"));
    assert!(stderr.contains("Total: 4 nodes, 2 directories, 2 others"));
}

#[test]
fn quiet_suppresses_summary() {
    let dir = sample_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .arg(dir.path())
        .args(["--quiet", "--summary-only"])
        .output()
        .expect("run binary");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Total:"));
}

#[test]
fn closed_stdout_is_an_error_but_counts_everything() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..400 {
        fs::create_dir_all(dir.path().join(format!("directory_with_a_long_name_{i}/inner"))).unwrap();
    }
    let mut child = Command::new(env!("CARGO_BIN_EXE_nodewalk"))
        .arg(dir.path())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .expect("spawn binary");
    drop(child.stdout.take());
    let output = child.wait_with_output().expect("wait for binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Total: 801 nodes, 801 directories, 0 others"), "{stderr}");
    assert!(stderr.contains("error: cannot write listing"), "{stderr}");
}
