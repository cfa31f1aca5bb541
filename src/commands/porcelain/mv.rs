use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Rename a tracked file or directory, keeping its history.
    pub fn move_path(&mut self, from: &Path, to: &Path) -> anyhow::Result<()> {
        if !from.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", from);
        }

        let from = self.relative(from)?;
        let to = self.relative(to)?;
        self.vcs().move_path(&from, &to)?;
        writeln!(self.writer(), "Moved {} to {}", from.display(), to.display())?;

        Ok(())
    }

    /// Express a user-supplied path relative to the working root.
    fn relative(&self, path: &Path) -> anyhow::Result<std::path::PathBuf> {
        let absolute = std::env::current_dir()?.join(path);
        let parent = absolute
            .parent()
            .map(|parent| parent.canonicalize())
            .transpose()?
            .unwrap_or_else(|| self.path().to_path_buf());
        let absolute = match absolute.file_name() {
            Some(name) => parent.join(name),
            None => parent,
        };

        absolute
            .strip_prefix(self.path())
            .map(|relative| relative.to_path_buf())
            .map_err(|_| anyhow::anyhow!("{} is outside the repository", path.display()))
    }
}
