mod common;

use assert_fs::TempDir;
use common::command::{
    bare_remote, connected_repository, git_stdout, init_repository_dir, run_git_command,
    run_vc_command,
};
use common::file::{FileSpec, read_file, write_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_clones_into_the_named_directory(connected_repository: (TempDir, TempDir)) {
    let (_repository, remote) = connected_repository;
    let workdir = TempDir::new().expect("Failed to create temp dir");
    let url = remote.path().display().to_string();

    run_vc_command(workdir.path(), &["checkout", &url, "copy"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Checked out {url}")));

    assert_eq!(read_file(&workdir.path().join("copy").join("main.src")), "fn main() {}\n");
}

#[rstest]
fn checkout_refuses_an_existing_directory(connected_repository: (TempDir, TempDir)) {
    let (_repository, remote) = connected_repository;
    let workdir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir(workdir.path().join("copy")).expect("Failed to create dir");
    let url = remote.path().display().to_string();

    run_vc_command(workdir.path(), &["checkout", &url, "copy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("copy already exists"));
}

#[rstest]
fn pull_brings_in_commits_from_the_remote(connected_repository: (TempDir, TempDir)) {
    let (repository, remote) = connected_repository;
    let other = TempDir::new().expect("Failed to create temp dir");
    let url = remote.path().display().to_string();

    run_git_command(other.path(), &["clone", &url, "."])
        .assert()
        .success();
    write_file(FileSpec::new(other.path().join("shared.txt"), "from elsewhere".to_string()));
    run_git_command(other.path(), &["add", "shared.txt"])
        .assert()
        .success();
    run_git_command(other.path(), &["commit", "-m", "share"])
        .assert()
        .success();
    run_git_command(other.path(), &["push", "origin", "main"])
        .assert()
        .success();

    run_vc_command(repository.path(), &["pull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch main"));

    assert_eq!(read_file(&repository.path().join("shared.txt")), "from elsewhere");
}

#[rstest]
fn info_reports_remote_and_branch(connected_repository: (TempDir, TempDir)) {
    let (repository, remote) = connected_repository;
    let url = remote.path().display().to_string();

    run_vc_command(repository.path(), &["info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Remote: {url} (origin)")))
        .stdout(predicate::str::contains("On branch main"));
}

#[rstest]
fn info_without_a_remote_says_so(init_repository_dir: TempDir) {
    run_vc_command(init_repository_dir.path(), &["info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote: origin is not configured"));
}

#[rstest]
fn move_renames_a_tracked_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_vc_command(dir, &["move", "main.src", "app.src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved main.src to app.src"));

    assert!(!dir.join("main.src").exists());
    let tracked = git_stdout(dir, &["ls-files"]);
    assert!(tracked.lines().any(|line| line == "app.src"));
    assert!(!tracked.lines().any(|line| line == "main.src"));
}

#[rstest]
fn move_of_a_missing_path_fails(init_repository_dir: TempDir) {
    run_vc_command(init_repository_dir.path(), &["move", "absent.src", "other.src"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[rstest]
fn new_creates_and_publishes_a_repository() {
    let workdir = TempDir::new().expect("Failed to create temp dir");
    let remote = bare_remote();
    write_file(FileSpec::new(workdir.path().join("hello.txt"), "hello".to_string()));
    let url = remote.path().display().to_string();

    run_vc_command(workdir.path(), &["new", "--url", &url, "-y", "-m", "first import"])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello.txt: [aixNdph]"));

    let history = git_stdout(remote.path(), &["log", "--format=%s", "main"]);
    assert_eq!(
        history.lines().collect::<Vec<_>>(),
        vec!["created README.md", "first import"]
    );
    assert!(workdir.path().join("README.md").exists());
}

#[rstest]
fn new_refuses_an_existing_repository(init_repository_dir: TempDir) {
    run_vc_command(init_repository_dir.path(), &["new", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already a repository"));
}

#[rstest]
fn declining_new_changes_nothing() {
    let workdir = TempDir::new().expect("Failed to create temp dir");

    run_vc_command(workdir.path(), &["new"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("vc new exited without any changes."));

    assert!(!workdir.path().join(".git").exists());
}
