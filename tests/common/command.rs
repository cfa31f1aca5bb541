use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use derive_new::new;
use rstest::fixture;
use std::path::Path;
use std::sync::LazyLock;

#[derive(Debug, Clone, new)]
pub struct RandomAuthor {
    pub name: String,
    pub email: String,
}

static AUTHOR: LazyLock<RandomAuthor> = LazyLock::new(generate_random_author);

fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let name = Name().fake::<String>().replace(" ", "_");
    let email = FreeEmail().fake::<String>();
    RandomAuthor::new(name, email)
}

fn identity_env() -> Vec<(&'static str, String)> {
    vec![
        ("GIT_AUTHOR_NAME", AUTHOR.name.clone()),
        ("GIT_AUTHOR_EMAIL", AUTHOR.email.clone()),
        ("GIT_COMMITTER_NAME", AUTHOR.name.clone()),
        ("GIT_COMMITTER_EMAIL", AUTHOR.email.clone()),
        ("GIT_CONFIG_NOSYSTEM", "1".to_string()),
        ("GIT_TERMINAL_PROMPT", "0".to_string()),
    ]
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository on `main` with one commit holding `main.src` and a `.gitignore` listing `build.out`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    git_init(repository_dir.path());

    write_file(FileSpec::new(
        repository_dir.path().join("main.src"),
        "fn main() {}\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join(".gitignore"),
        "build.out\n".to_string(),
    ));

    run_git_command(repository_dir.path(), &["add", "main.src", ".gitignore"])
        .assert()
        .success();
    run_git_command(repository_dir.path(), &["commit", "-m", "Initial commit"])
        .assert()
        .success();

    repository_dir
}

/// A bare repository whose `main` already holds the initial commit of `init_repository_dir`,
/// with the working repository tracking it as `origin`.
#[fixture]
pub fn connected_repository(init_repository_dir: TempDir) -> (TempDir, TempDir) {
    let remote_dir = bare_remote();

    let url = remote_dir.path().display().to_string();
    run_git_command(init_repository_dir.path(), &["remote", "add", "origin", &url])
        .assert()
        .success();
    run_git_command(init_repository_dir.path(), &["push", "-u", "origin", "main"])
        .assert()
        .success();

    (init_repository_dir, remote_dir)
}

pub fn bare_remote() -> TempDir {
    let remote_dir = TempDir::new().expect("Failed to create temp dir");
    run_git_command(remote_dir.path(), &["init", "--bare"])
        .assert()
        .success();
    run_git_command(remote_dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    remote_dir
}

pub fn git_init(dir: &Path) {
    run_git_command(dir, &["init"]).assert().success();
    run_git_command(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
}

pub fn run_vc_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vc").expect("Failed to find vc binary");
    cmd.envs(identity_env());
    cmd.env("VC_NO_BACKUP", "1");
    cmd.env_remove("VC_REMOTE");
    cmd.env_remove("VC_BACKUP_DIR");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.envs(identity_env());
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_git_command(dir, args)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Paths changed by the commit at `HEAD`, one per line.
pub fn files_in_head_commit(dir: &Path) -> Vec<String> {
    git_stdout(dir, &["show", "--name-only", "--format=", "HEAD"])
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn commit_count(dir: &Path) -> usize {
    git_stdout(dir, &["rev-list", "--count", "HEAD"])
        .trim()
        .parse()
        .unwrap_or(0)
}
