use crate::areas::repository::Repository;
use crate::artifacts::core::error::VcError;
use crate::artifacts::ignore::pattern::IgnorePattern;
use crate::artifacts::scan::scanner::Scanner;
use crate::artifacts::triage::engine::{TriageEngine, TriageReport, TriageTarget};
use colored::Colorize;
use derive_new::new;
use log::{debug, info};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, new)]
pub struct PushOptions {
    /// Commit to the local repository only
    pub local: bool,
    /// Commit message; asked for when absent
    pub message: Option<String>,
    /// Skip the confirmation before publishing
    pub assume_yes: bool,
}

/// Triage side effects against the real working tree.
struct RepositoryTarget<'r> {
    repository: &'r Repository,
}

impl TriageTarget for RepositoryTarget<'_> {
    fn track(&mut self, path: &Path) -> anyhow::Result<()> {
        self.repository.vcs().stage(path)
    }

    fn persist(&mut self, pattern: &IgnorePattern) -> anyhow::Result<()> {
        Ok(self.repository.ignore_file().append(pattern)?)
    }

    fn delete(&mut self, path: &Path) -> Result<(), VcError> {
        self.repository.workspace().delete_file(path)
    }
}

impl Repository {
    pub fn push(&mut self, options: &PushOptions) -> anyhow::Result<()> {
        self.show_location()?;
        self.backup()?;
        self.commit_local(options.message.as_deref())?;

        if options.local {
            return Ok(());
        }

        let remote = self.config().remote.clone();
        let confirmed = options.assume_yes
            || self
                .operator()
                .confirm(&format!("push to remote repo ({remote})"))?;
        if !confirmed {
            writeln!(self.writer(), "Not pushed; the commit stays in the local repo.")?;
            return Ok(());
        }

        let branch = self.require_branch()?;
        self.vcs().publish(&remote, &branch, false)
    }

    /// Copy the working root aside before anything changes.
    pub(crate) fn backup(&self) -> anyhow::Result<()> {
        if !self.config().backups_enabled {
            debug!("backups disabled");
            return Ok(());
        }

        let parent = self.config().backup_parent(self.path());
        let destination = self.workspace().backup_to(&parent)?;
        info!("backed up {} to {}", self.path().display(), destination.display());
        writeln!(self.writer(), "Backed up to {}", destination.display())?;

        Ok(())
    }

    /// Triage unmanaged files, then commit every tracked change.
    pub(crate) fn commit_local(&self, message: Option<&str>) -> anyhow::Result<TriageReport> {
        let ignore_list = self.ignore_file().load()?;
        let status = self.vcs().status()?;
        let listing = self.workspace().list_files()?;

        let entries = Scanner::new(&ignore_list, &status).scan(listing);
        let report = {
            let mut target = RepositoryTarget { repository: self };
            let mut operator = self.operator();
            TriageEngine::new(ignore_list.clone()).run(entries, &mut **operator, &mut target)?
        };
        self.summarize(&report)?;

        if !self.vcs().has_changes()? {
            writeln!(self.writer(), "Nothing to commit.")?;
            return Ok(report);
        }

        let message = match message {
            Some(message) if !message.trim().is_empty() => message.trim().to_string(),
            _ => self.ask_commit_message()?,
        };
        self.vcs().commit_all(&message)?;

        Ok(report)
    }

    fn summarize(&self, report: &TriageReport) -> anyhow::Result<()> {
        let handled = report.added.len()
            + report.ignored.len()
            + report.deleted.len()
            + report.passed.len()
            + report.suppressed.len();
        if handled == 0 {
            return Ok(());
        }

        writeln!(
            self.writer(),
            "{} {} added, {} ignore patterns added, {} deleted, {} passed",
            "Unmanaged files:".bold(),
            report.added.len(),
            report.ignored.len(),
            report.deleted.len(),
            report.passed.len()
        )?;

        Ok(())
    }

    fn ask_commit_message(&self) -> anyhow::Result<String> {
        let answer = self.operator().ask("Commit message: ")?;
        let answer = answer.trim();

        if answer.is_empty() {
            let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            return Ok(format!("vc push {stamp}"));
        }

        Ok(answer.to_string())
    }

    pub(crate) fn require_branch(&self) -> anyhow::Result<String> {
        self.vcs()
            .current_branch()?
            .ok_or_else(|| anyhow::anyhow!("HEAD is detached; check out a branch first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::vcs::{Remote, VersionControl};
    use crate::artifacts::core::config::Config;
    use crate::artifacts::scan::working_tree::WorkingTreeStatus;
    use crate::artifacts::triage::operator::TerminalOperator;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Records every git operation instead of running it; the tree always has changes.
    struct FakeGit {
        status: WorkingTreeStatus,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl FakeGit {
        fn record(&self, call: String) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(call);
            Ok(())
        }
    }

    impl VersionControl for FakeGit {
        fn status(&self) -> anyhow::Result<WorkingTreeStatus> {
            Ok(self.status.clone())
        }

        fn has_changes(&self) -> anyhow::Result<bool> {
            Ok(true)
        }

        fn status_text(&self) -> anyhow::Result<String> {
            Ok(String::new())
        }

        fn stage(&self, path: &Path) -> anyhow::Result<()> {
            self.record(format!("stage {}", path.display()))
        }

        fn commit_all(&self, message: &str) -> anyhow::Result<()> {
            self.record(format!("commit {message}"))
        }

        fn publish(&self, remote: &str, branch: &str, _set_upstream: bool) -> anyhow::Result<()> {
            self.record(format!("publish {remote} {branch}"))
        }

        fn pull(&self, remote: &str, _: Option<&str>, _: bool) -> anyhow::Result<()> {
            self.record(format!("pull {remote}"))
        }

        fn clone_into(&self, url: &str, _: Option<&Path>) -> anyhow::Result<()> {
            self.record(format!("clone {url}"))
        }

        fn init(&self) -> anyhow::Result<()> {
            self.record("init".to_string())
        }

        fn set_initial_branch(&self, branch: &str) -> anyhow::Result<()> {
            self.record(format!("branch {branch}"))
        }

        fn current_branch(&self) -> anyhow::Result<Option<String>> {
            Ok(Some("main".to_string()))
        }

        fn remotes(&self) -> anyhow::Result<Vec<Remote>> {
            Ok(vec![])
        }

        fn add_remote(&self, name: &str, _: &str) -> anyhow::Result<()> {
            self.record(format!("remote {name}"))
        }

        fn fetch(&self, remote: &str) -> anyhow::Result<()> {
            self.record(format!("fetch {remote}"))
        }

        fn has_remote_branch(&self, _: &str, _: &str) -> anyhow::Result<bool> {
            Ok(false)
        }

        fn set_upstream(&self, remote: &str, _: &str) -> anyhow::Result<()> {
            self.record(format!("upstream {remote}"))
        }

        fn move_path(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
            self.record(format!("mv {} {}", from.display(), to.display()))
        }
    }

    fn paths(paths: &[&str]) -> BTreeSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn fake_repository(
        dir: &TempDir,
        status: WorkingTreeStatus,
        answers: &'static str,
    ) -> anyhow::Result<(Repository, Rc<RefCell<Vec<String>>>)> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let git = FakeGit {
            status,
            calls: calls.clone(),
        };
        let operator = TerminalOperator::new(Cursor::new(answers), std::io::sink());
        let config = Config::new("git".into(), "origin".into(), None, false);

        let repository = Repository::new(
            dir.path(),
            Box::new(std::io::sink()),
            Box::new(operator),
            Box::new(git),
            config,
        )?;
        Ok((repository, calls))
    }

    #[test]
    fn ignored_new_file_leaves_only_tracked_changes_for_the_commit() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("main.src").write_str("changed")?;
        dir.child("build.out").write_str("binary")?;
        dir.child("notes.tmp").write_str("scratch")?;
        dir.child(".gitignore").write_str("build.out\n")?;
        let status = WorkingTreeStatus {
            tracked: paths(&["main.src", ".gitignore"]),
            untracked: paths(&["notes.tmp"]),
        };
        let (mut repository, calls) = fake_repository(&dir, status, "i\n")?;

        repository.push(&PushOptions::new(true, Some("update".into()), false))?;

        assert_eq!(*calls.borrow(), vec!["commit update".to_string()]);
        assert_eq!(
            std::fs::read_to_string(dir.child(".gitignore").path())?,
            "build.out\n/notes.tmp\n"
        );
        Ok(())
    }

    #[test]
    fn remote_push_needs_confirmation() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("main.src").write_str("changed")?;
        let status = WorkingTreeStatus {
            tracked: paths(&["main.src"]),
            untracked: paths(&[]),
        };

        let (mut repository, calls) = fake_repository(&dir, status.clone(), "no\n")?;
        repository.push(&PushOptions::new(false, Some("wip".into()), false))?;
        assert_eq!(*calls.borrow(), vec!["commit wip".to_string()]);

        let (mut repository, calls) = fake_repository(&dir, status, "Y\n")?;
        repository.push(&PushOptions::new(false, Some("wip".into()), false))?;
        assert_eq!(
            *calls.borrow(),
            vec!["commit wip".to_string(), "publish origin main".to_string()]
        );
        Ok(())
    }

    #[test]
    fn empty_commit_message_falls_back_to_a_timestamp() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        dir.child("main.src").write_str("changed")?;
        let status = WorkingTreeStatus {
            tracked: paths(&["main.src"]),
            untracked: paths(&[]),
        };
        let (mut repository, calls) = fake_repository(&dir, status, "\n")?;

        repository.push(&PushOptions::new(true, None, false))?;

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("commit vc push "));
        Ok(())
    }
}
