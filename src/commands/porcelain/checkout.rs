use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Clone `url` into `directory` (git picks the name when absent).
    pub fn checkout(&mut self, url: &str, directory: Option<&Path>) -> anyhow::Result<()> {
        if let Some(directory) = directory
            && self.path().join(directory).exists()
        {
            anyhow::bail!("{} already exists", directory.display());
        }

        self.vcs().clone_into(url, directory)?;
        writeln!(self.writer(), "Checked out {url}")?;

        Ok(())
    }
}
