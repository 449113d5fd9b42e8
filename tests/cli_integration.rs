/*!
 * Integration tests running the gatherfs binary
 */

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn gatherfs() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gatherfs"))
}

fn output_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.to_string_lossy().ends_with("_files_within.txt"))
        .collect();
    files.sort();
    files
}

#[test]
fn test_default_run_writes_into_printouts_dir() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("app.py"), "APP = 1\n").unwrap();
    fs::create_dir(temp_dir.path().join("__pycache__")).unwrap();
    fs::write(temp_dir.path().join("__pycache__").join("app.py"), "CACHED\n").unwrap();

    let output = gatherfs()
        .current_dir(temp_dir.path())
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files have been gathered and written to"));

    let written = output_files(&temp_dir.path().join("directory_printouts"));
    assert_eq!(written.len(), 1);

    let manifest = fs::read_to_string(&written[0]).unwrap();
    assert!(manifest.starts_with("Number of files: 1\n"));
    assert!(manifest.contains("APP = 1"));
    assert!(!manifest.contains("CACHED"));
}

#[test]
fn test_pythons_profile_writes_into_working_dir() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("main.py"), "MAIN = 1\n").unwrap();
    fs::write(project.join("README.md"), "# readme\n").unwrap();

    let output = gatherfs()
        .current_dir(temp_dir.path())
        .args(["--profile", "pythons", "--quiet", "project"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let written = output_files(temp_dir.path());
    assert_eq!(written.len(), 1);

    let manifest = fs::read_to_string(&written[0]).unwrap();
    assert!(manifest.contains("main.py"));
    assert!(!manifest.contains("README.md"));
}

#[test]
fn test_invalid_utf8_is_reported_on_stdout() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("ok.py"), "OK = 1\n").unwrap();
    fs::write(temp_dir.path().join("bad.py"), [0xffu8, 0xfe, 0x00]).unwrap();

    let output = gatherfs()
        .current_dir(temp_dir.path())
        .args(["--quiet", "--output-dir", "out"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not read file bad.py due to encoding error. Skipping."));

    let written = output_files(&temp_dir.path().join("out"));
    let manifest = fs::read_to_string(&written[0]).unwrap();
    assert!(manifest.contains("ok.py"));
    assert!(!manifest.contains("bad.py"));
}

#[cfg(unix)]
#[test]
fn test_read_error_is_reported_on_stdout() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("ok.py"), "OK = 1\n").unwrap();
    std::os::unix::fs::symlink(
        temp_dir.path().join("missing.py"),
        temp_dir.path().join("dangling.py"),
    )
    .unwrap();

    let output = gatherfs()
        .current_dir(temp_dir.path())
        .args(["--quiet", "--output-dir", "out"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|l| l.contains("An unexpected error occurred with file dangling.py: "))
        .unwrap_or_else(|| panic!("no read error diagnostic in {:?}", stdout));
    // The error detail follows the path
    assert!(!line
        .trim_end()
        .ends_with("An unexpected error occurred with file dangling.py:"));

    let written = output_files(&temp_dir.path().join("out"));
    let manifest = fs::read_to_string(&written[0]).unwrap();
    assert!(manifest.contains("ok.py"));
    assert!(!manifest.contains("dangling.py"));
}

#[test]
fn test_unwritable_output_dir_fails() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("taken"), "").unwrap();

    let output = gatherfs()
        .current_dir(temp_dir.path())
        .args(["--quiet", "--output-dir", "taken/out"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_generate_completions() {
    let output = gatherfs().args(["--generate", "bash"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("gatherfs"));
}
