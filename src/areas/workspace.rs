use crate::artifacts::core::error::VcError;
use anyhow::Context;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// VCS internal directories that are never listed or offered for triage.
pub const VCS_INTERNALS: [&str; 9] = [
    ".git", ".jj", ".svn", ".hg", ".bzr", "_darcs", ".pijul", "CVS", ".fossil",
];

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every regular file (or symlink) under the root, relative to it, in name order.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            anyhow::bail!("The working directory does not exist: {:?}", self.path);
        }

        let files = WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_vcs_internal(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!("skipping unreadable entry: {error}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() || entry.file_type().is_symlink())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect::<Vec<_>>();

        debug!("listed {} files under {}", files.len(), self.path.display());
        Ok(files)
    }

    fn is_vcs_internal(entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && VCS_INTERNALS.contains(&entry.file_name().to_string_lossy().as_ref())
    }

    pub fn exists(&self, file_path: &Path) -> bool {
        self.path.join(file_path).exists()
    }

    pub fn write_file(&self, file_path: &Path, content: &str) -> anyhow::Result<()> {
        let path = self.path.join(file_path);
        std::fs::write(&path, content).with_context(|| format!("Failed to write file: {:?}", path))
    }

    pub fn delete_file(&self, file_path: &Path) -> Result<(), VcError> {
        let path = self.path.join(file_path);

        std::fs::remove_file(&path).map_err(|source| VcError::FileSystem { path, source })
    }

    /// Copy the whole working root (history included) into
    /// `<parent>/<timestamp>/<root name>` and return that directory.
    pub fn backup_to(&self, parent: &Path) -> anyhow::Result<PathBuf> {
        let stamp = chrono::Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut slot = parent.join(&stamp);
        let mut attempt = 1;
        while slot.exists() {
            slot = parent.join(format!("{stamp}-{attempt}"));
            attempt += 1;
        }

        let root_name = self.path.file_name().unwrap_or_default();
        let destination = slot.join(root_name);
        std::fs::create_dir_all(&destination)
            .with_context(|| format!("Failed to create backup directory: {:?}", destination))?;

        // a backup parent inside the root must not copy itself
        let parent = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());

        for entry in WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !entry.path().starts_with(&parent))
        {
            let entry = entry.context("Failed to read the working directory")?;
            let relative = entry.path().strip_prefix(self.path.as_ref())?;
            if relative.as_os_str().is_empty() {
                continue;
            }

            let target = destination.join(relative);
            Self::copy_entry(&entry, &target)?;
        }

        Ok(destination)
    }

    fn copy_entry(entry: &DirEntry, target: &Path) -> anyhow::Result<()> {
        let file_type = entry.file_type();
        let fs_error = |source| VcError::FileSystem {
            path: entry.path().to_path_buf(),
            source,
        };

        if file_type.is_dir() {
            std::fs::create_dir_all(target).map_err(fs_error)?;
        } else if file_type.is_symlink() {
            let link = std::fs::read_link(entry.path()).map_err(fs_error)?;
            #[cfg(unix)]
            std::os::unix::fs::symlink(&link, target).map_err(fs_error)?;
            #[cfg(not(unix))]
            warn!("not copying symlink {:?} -> {:?}", entry.path(), link);
        } else {
            std::fs::copy(entry.path(), target).map_err(fs_error)?;
        }

        Ok(())
    }
}
