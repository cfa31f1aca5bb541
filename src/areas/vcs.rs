//! Version control collaborator
//!
//! Everything `vc` needs from git, behind the `VersionControl` trait. `GitCli`
//! runs the git executable as a blocking subprocess in the working root; a
//! non-zero exit becomes `VcError::Subprocess` carrying git's own stderr.
//!
//! Commands whose output is meant for the operator (commit, pull, push, clone)
//! inherit the terminal, so git's messages and diagnostics reach it verbatim.

use crate::artifacts::core::error::VcError;
use crate::artifacts::scan::working_tree::WorkingTreeStatus;
use anyhow::Context;
use derive_new::new;
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Regex pattern for one line of `git remote -v`
const REMOTE_LINE_REGEX: &str = r"^(\S+)\s+(\S+)\s+\((fetch|push)\)$";

/// A remote as listed by `git remote -v`.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Remote {
    pub name: String,
    pub url: String,
    pub direction: String,
}

pub trait VersionControl {
    /// Tracked and untracked files, relative to the working root.
    fn status(&self) -> anyhow::Result<WorkingTreeStatus>;
    /// Whether a commit of all tracked changes would record anything.
    fn has_changes(&self) -> anyhow::Result<bool>;
    /// Human-readable status, as `git status` prints it.
    fn status_text(&self) -> anyhow::Result<String>;
    fn stage(&self, path: &Path) -> anyhow::Result<()>;
    /// Commit every change to tracked files.
    fn commit_all(&self, message: &str) -> anyhow::Result<()>;
    /// Push `branch` to `remote`, recording it as upstream when `set_upstream` holds.
    fn publish(&self, remote: &str, branch: &str, set_upstream: bool) -> anyhow::Result<()>;
    fn pull(&self, remote: &str, branch: Option<&str>, allow_unrelated: bool)
    -> anyhow::Result<()>;
    fn clone_into(&self, url: &str, directory: Option<&Path>) -> anyhow::Result<()>;
    fn init(&self) -> anyhow::Result<()>;
    /// Name the branch of a freshly initialized repository.
    fn set_initial_branch(&self, branch: &str) -> anyhow::Result<()>;
    /// `None` when HEAD is detached.
    fn current_branch(&self) -> anyhow::Result<Option<String>>;
    fn remotes(&self) -> anyhow::Result<Vec<Remote>>;
    fn add_remote(&self, name: &str, url: &str) -> anyhow::Result<()>;
    fn fetch(&self, remote: &str) -> anyhow::Result<()>;
    fn has_remote_branch(&self, remote: &str, branch: &str) -> anyhow::Result<bool>;
    fn set_upstream(&self, remote: &str, branch: &str) -> anyhow::Result<()>;
    fn move_path(&self, from: &Path, to: &Path) -> anyhow::Result<()>;
}

/// `VersionControl` backed by the git executable.
#[derive(Debug, Clone, new)]
pub struct GitCli {
    git: String,
    root: PathBuf,
}

impl GitCli {
    /// Locate the top of the working tree containing `dir`.
    pub fn discover(git: &str, dir: &Path) -> anyhow::Result<Self> {
        let probe = GitCli::new(git.to_string(), dir.to_path_buf());
        let output = probe.output(&["rev-parse", "--show-toplevel"])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(VcError::NotARepository(stderr).into());
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(VcError::NotARepository(dir.display().to_string()).into());
        }

        Ok(GitCli::new(git.to_string(), PathBuf::from(root)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!("running {} {} in {}", self.git, args.join(" "), self.root.display());
        let mut command = Command::new(&self.git);
        command.args(args).current_dir(&self.root);
        command
    }

    fn output(&self, args: &[&str]) -> anyhow::Result<Output> {
        self.command(args)
            .output()
            .with_context(|| format!("Failed to run {}", self.git))
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.git, args.join(" "))
    }

    /// Run and collect stdout; stderr becomes the error on failure.
    fn capture(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self.output(args)?;

        if !output.status.success() {
            return Err(VcError::Subprocess {
                command: self.describe(args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run attached to the terminal.
    fn passthrough(&self, args: &[&str]) -> anyhow::Result<()> {
        let status = self
            .command(args)
            .status()
            .with_context(|| format!("Failed to run {}", self.git))?;

        if !status.success() {
            return Err(VcError::Subprocess {
                command: self.describe(args),
                status: status.to_string(),
                stderr: String::new(),
            }
            .into());
        }

        Ok(())
    }

    fn succeeds(&self, args: &[&str]) -> anyhow::Result<bool> {
        Ok(self.output(args)?.status.success())
    }

    fn path_set(&self, args: &[&str]) -> anyhow::Result<BTreeSet<PathBuf>> {
        Ok(split_nul(&self.capture(args)?).map(PathBuf::from).collect())
    }
}

fn split_nul(output: &str) -> impl Iterator<Item = &str> {
    output.split('\0').filter(|path| !path.is_empty())
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub fn parse_remotes(output: &str) -> anyhow::Result<Vec<Remote>> {
    let regex = regex::Regex::new(REMOTE_LINE_REGEX)?;

    Ok(output
        .lines()
        .filter_map(|line| regex.captures(line.trim()))
        .map(|captures| Remote::new(captures[1].to_string(), captures[2].to_string(), captures[3].to_string()))
        .collect())
}

impl VersionControl for GitCli {
    fn status(&self) -> anyhow::Result<WorkingTreeStatus> {
        let tracked = self.path_set(&["ls-files", "-z"])?;
        let untracked = self.path_set(&["ls-files", "-z", "--others", "--exclude-standard"])?;

        debug!("status: {} tracked, {} untracked", tracked.len(), untracked.len());

        Ok(WorkingTreeStatus { tracked, untracked })
    }

    fn has_changes(&self) -> anyhow::Result<bool> {
        let porcelain = self.capture(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(!porcelain.trim().is_empty())
    }

    fn status_text(&self) -> anyhow::Result<String> {
        self.capture(&["status"])
    }

    fn stage(&self, path: &Path) -> anyhow::Result<()> {
        self.capture(&["add", "--", &path_arg(path)]).map(|_| ())
    }

    fn commit_all(&self, message: &str) -> anyhow::Result<()> {
        self.passthrough(&["commit", "-a", "-m", message])
    }

    fn publish(&self, remote: &str, branch: &str, set_upstream: bool) -> anyhow::Result<()> {
        if set_upstream {
            self.passthrough(&["push", "-u", remote, branch])
        } else {
            self.passthrough(&["push", remote, branch])
        }
    }

    fn pull(
        &self,
        remote: &str,
        branch: Option<&str>,
        allow_unrelated: bool,
    ) -> anyhow::Result<()> {
        let mut args = vec!["pull"];
        if allow_unrelated {
            args.push("--allow-unrelated-histories");
        }
        args.push(remote);
        args.extend(branch);
        self.passthrough(&args)
    }

    fn clone_into(&self, url: &str, directory: Option<&Path>) -> anyhow::Result<()> {
        match directory {
            Some(directory) => self.passthrough(&["clone", url, &path_arg(directory)]),
            None => self.passthrough(&["clone", url]),
        }
    }

    fn init(&self) -> anyhow::Result<()> {
        self.capture(&["init"]).map(|_| ())
    }

    fn set_initial_branch(&self, branch: &str) -> anyhow::Result<()> {
        let reference = format!("refs/heads/{branch}");
        self.capture(&["symbolic-ref", "HEAD", &reference]).map(|_| ())
    }

    fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let branch = self.capture(&["branch", "--show-current"])?;
        let branch = branch.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    fn remotes(&self) -> anyhow::Result<Vec<Remote>> {
        parse_remotes(&self.capture(&["remote", "-v"])?)
    }

    fn add_remote(&self, name: &str, url: &str) -> anyhow::Result<()> {
        self.capture(&["remote", "add", name, url]).map(|_| ())
    }

    fn fetch(&self, remote: &str) -> anyhow::Result<()> {
        self.passthrough(&["fetch", remote])
    }

    fn has_remote_branch(&self, remote: &str, branch: &str) -> anyhow::Result<bool> {
        let reference = format!("refs/remotes/{remote}/{branch}");
        self.succeeds(&["rev-parse", "--verify", "--quiet", &reference])
    }

    fn set_upstream(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let upstream = format!("--set-upstream-to={remote}/{branch}");
        self.capture(&["branch", &upstream, branch]).map(|_| ())
    }

    fn move_path(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        self.capture(&["mv", "--", &path_arg(from), &path_arg(to)]).map(|_| ())
    }
}
