use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub fn info(&mut self) -> anyhow::Result<()> {
        self.show_location()?;
        let status = self.vcs().status_text()?;
        write!(self.writer(), "{status}")?;

        Ok(())
    }

    /// Print where commands will publish to and which branch is checked out.
    pub(crate) fn show_location(&self) -> anyhow::Result<()> {
        let remote = self.config().remote.clone();
        let url = self
            .vcs()
            .remotes()?
            .into_iter()
            .find(|candidate| candidate.name == remote && candidate.direction == "fetch")
            .map(|candidate| candidate.url);

        match url {
            Some(url) => writeln!(self.writer(), "Remote: {} ({})", url.cyan(), remote)?,
            None => writeln!(self.writer(), "Remote: {} is not configured", remote.yellow())?,
        }

        match self.vcs().current_branch()? {
            Some(branch) => writeln!(self.writer(), "On branch {}", branch.green())?,
            None => writeln!(self.writer(), "{}", "HEAD detached".yellow())?,
        }

        Ok(())
    }
}
