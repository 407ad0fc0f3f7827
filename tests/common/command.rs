use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A fresh, initialized repository.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_legit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// An initialized repository with `a=1` committed as commit 0 ("first").
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a"),
        "1".to_string(),
    ));

    run_legit_command(init_repository_dir.path(), &["add", "a"])
        .assert()
        .success();

    run_legit_command(init_repository_dir.path(), &["commit", "-m", "first"])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_legit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("legit").expect("Failed to find legit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_legit_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("stdout is valid utf-8")
}
