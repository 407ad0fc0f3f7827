use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, run_legit_command, stdout_of};
use common::file::{file_exists, read_named, write_named};

#[rstest]
fn rm_removes_a_clean_file_from_index_and_working_tree(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_legit_command(dir.path(), &["rm", "a"]).assert().success();

    assert!(!file_exists(dir.path(), "a"));
    assert_eq!(
        stdout_of(dir.path(), &["status"]),
        "a - file deleted, deleted from index\n"
    );
}

#[rstest]
fn rm_cached_leaves_the_working_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_legit_command(dir.path(), &["rm", "--cached", "a"])
        .assert()
        .success();

    assert_eq!(read_named(dir.path(), "a"), "1");
    assert_eq!(stdout_of(dir.path(), &["status"]), "a - deleted from index\n");
}

#[rstest]
fn rm_refuses_a_working_edit(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");

    run_legit_command(dir.path(), &["rm", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "git-rm: error: 'a' in the repository is different to the working file\n",
        ));

    assert_eq!(read_named(dir.path(), "a"), "2");
}

#[rstest]
fn rm_force_overrides_the_working_edit(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");

    run_legit_command(dir.path(), &["rm", "--force", "a"])
        .assert()
        .success();

    assert!(!file_exists(dir.path(), "a"));
    assert_eq!(
        stdout_of(dir.path(), &["status"]),
        "a - file deleted, deleted from index\n"
    );
}

#[rstest]
fn rm_refuses_staged_changes(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");
    run_legit_command(dir.path(), &["add", "a"]).assert().success();

    run_legit_command(dir.path(), &["rm", "a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "git-rm: error: 'a' has staged changes in the index\n",
        ));
}

#[rstest]
fn rm_cached_allows_staged_changes(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");
    run_legit_command(dir.path(), &["add", "a"]).assert().success();

    run_legit_command(dir.path(), &["rm", "--cached", "a"])
        .assert()
        .success();

    assert_eq!(read_named(dir.path(), "a"), "2");
}

#[rstest]
fn rm_refuses_an_index_diverged_from_both_sides(
    committed_repository_dir: TempDir,
    #[values(&["rm", "a"], &["rm", "--cached", "a"])] args: &[&str],
) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");
    run_legit_command(dir.path(), &["add", "a"]).assert().success();
    write_named(dir.path(), "a", "3");

    run_legit_command(dir.path(), args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "git-rm: error: 'a' in index is different to both the working file and the repository\n",
        ));
}

#[rstest]
fn rm_refuses_an_untracked_file(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "c", "x");

    run_legit_command(dir.path(), &["rm", "c"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "git-rm: error: 'c' is not in the git repository\n",
        ));

    assert!(file_exists(dir.path(), "c"));
}

#[rstest]
fn rm_force_still_requires_tracking(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "c", "x");

    run_legit_command(dir.path(), &["rm", "--force", "c"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "git-rm: error: 'c' is not in the git repository\n",
        ));
}

#[rstest]
fn a_failing_file_leaves_the_whole_request_unapplied(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "c", "x");

    // 'a' is safe to remove, 'c' is not tracked; nothing may change
    run_legit_command(dir.path(), &["rm", "a", "c"])
        .assert()
        .failure()
        .code(1);

    assert!(file_exists(dir.path(), "a"));
    assert_eq!(
        stdout_of(dir.path(), &["status"]),
        "a - same as repo\nc - untracked\n"
    );
}

#[rstest]
fn rm_accepts_flags_in_either_order(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    write_named(dir.path(), "a", "2");
    run_legit_command(dir.path(), &["add", "a"]).assert().success();
    write_named(dir.path(), "a", "3");

    run_legit_command(dir.path(), &["rm", "--force", "--cached", "a"])
        .assert()
        .success();

    // --cached kept the working file, --force skipped the safety checks
    assert_eq!(read_named(dir.path(), "a"), "3");
    run_legit_command(dir.path(), &["rm", "--cached", "--force", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not in the git repository"));
}
